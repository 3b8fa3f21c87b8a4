//! Screen implementations. Each screen is a top-level Component.

pub mod dashboard;
pub mod products;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
///
/// `source` is the catalog location shown on the dashboard.
pub fn create_screens(source: &str) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new(source)),
        ),
        (ScreenId::Products, Box::new(products::ProductsScreen::new())),
    ]
}
