/// A user-intent applied to a screen view-model.
///
/// Actions are:
/// - **plain data** (cloneable, debuggable, no behaviour)
/// - **named** with a stable type string used in logs and change notifications
pub trait Action: Clone + core::fmt::Debug {
    /// Stable action name (e.g. "sales.cart.item_added").
    fn action_type(&self) -> &'static str;
}
