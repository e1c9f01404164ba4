use serde::{Deserialize, Serialize};

/// Top-level screens of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Dashboard,
    Sales,
    Products,
    Inventory,
    Customers,
    Transactions,
    Reports,
    Settings,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 8] = [
        Page::Dashboard,
        Page::Sales,
        Page::Products,
        Page::Inventory,
        Page::Customers,
        Page::Transactions,
        Page::Reports,
        Page::Settings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Dashboard => "/",
            Page::Sales => "/sales",
            Page::Products => "/products",
            Page::Inventory => "/inventory",
            Page::Customers => "/customers",
            Page::Transactions => "/transactions",
            Page::Reports => "/reports",
            Page::Settings => "/settings",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Sales => "Sales",
            Page::Products => "Products",
            Page::Inventory => "Inventory",
            Page::Customers => "Customers",
            Page::Transactions => "Transactions",
            Page::Reports => "Reports",
            Page::Settings => "Settings",
        }
    }

    /// Resolve a route; unknown paths land on the dashboard.
    pub fn from_path(path: &str) -> Page {
        Page::ALL
            .into_iter()
            .find(|page| page.path() == path)
            .unwrap_or_default()
    }
}
