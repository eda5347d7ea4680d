use dioxus::prelude::*;

use store::ClientConfig;
use ui::{ActivityLogProvider, AuthProvider, PreferencesProvider};
use views::{
    AppLayout, Costs, CustomerDetail, Customers, Dashboard, EditProduct, Expenses, Login,
    NewOrder, NewPurchase, NotFound, Orders, ProductDetail, Products, Purchases, Register,
    Reports, Search, Settings, Stock, StockAdjustment, StockMovements, Suppliers, Tasks, ZenVitAi,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(AppLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/products")]
        Products {},
        #[route("/products/:id")]
        ProductDetail { id: String },
        #[route("/products/:id/edit")]
        EditProduct { id: String },
        #[route("/customers")]
        Customers {},
        #[route("/customers/:id")]
        CustomerDetail { id: String },
        #[route("/orders")]
        Orders {},
        #[route("/orders/new")]
        NewOrder {},
        #[route("/purchases")]
        Purchases {},
        #[route("/purchases/new")]
        NewPurchase {},
        #[route("/suppliers")]
        Suppliers {},
        #[route("/stock")]
        Stock {},
        #[route("/stock/adjust")]
        StockAdjustment {},
        #[route("/stock-movements")]
        StockMovements {},
        #[route("/tasks")]
        Tasks {},
        #[route("/expenses")]
        Expenses {},
        #[route("/costs")]
        Costs {},
        #[route("/reports")]
        Reports {},
        #[route("/search?:q")]
        Search { q: String },
        #[route("/ai")]
        ZenVitAi {},
        #[route("/settings")]
        Settings {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Read once; every request goes through this base URL.
    let config = ClientConfig::from_env(option_env!("ZENVIT_BACKEND_URL"));

    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }

        AuthProvider {
            config,
            PreferencesProvider {
                ActivityLogProvider {
                    Router::<Route> {}
                }
            }
        }
    }
}

/// Redirect `/` to `/dashboard`; the guard sends anonymous users on to login.
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.replace(Route::Dashboard {});
    });
    rsx! {}
}
