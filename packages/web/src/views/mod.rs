use api::ApiError;
use dioxus::prelude::*;
use ui::{log_activity, ActivityLog, AuthContext, LogLevel};

mod layout;
pub use layout::{AppLayout, NotFound};

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod figures;

mod dashboard;
pub use dashboard::Dashboard;

mod reports;
pub use reports::Reports;

mod products;
pub use products::Products;

mod product_detail;
pub use product_detail::ProductDetail;

mod edit_product;
pub use edit_product::EditProduct;

mod customers;
pub use customers::Customers;

mod customer_detail;
pub use customer_detail::CustomerDetail;

mod orders;
pub use orders::Orders;

mod line_items;
pub use line_items::{NewOrder, NewPurchase};

mod purchases;
pub use purchases::Purchases;

mod suppliers;
pub use suppliers::Suppliers;

mod stock;
pub use stock::{Stock, StockMovements};

mod stock_adjustment;
pub use stock_adjustment::StockAdjustment;

mod tasks;
pub use tasks::Tasks;

mod finance;
pub use finance::{Costs, Expenses};

mod search;
pub use search::Search;

mod zenvit_ai;
pub use zenvit_ai::ZenVitAi;

mod settings;
pub use settings::Settings;

/// Log a failed request, expire the session on a rejected token and return
/// the message to show on the page.
pub(crate) fn report_failure(
    auth: AuthContext,
    mut log: Signal<ActivityLog>,
    err: &ApiError,
    context: &str,
) -> String {
    auth.check_unauthorized(err);
    log_activity(&mut log, LogLevel::Error, &format!("{context}: {err}"));
    err.user_message(context)
}
