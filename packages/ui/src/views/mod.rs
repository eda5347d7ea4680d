mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod confirm_dialog;
pub use confirm_dialog::ConfirmDialog;

mod error_banner;
pub use error_banner::{EmptyState, ErrorBanner, LoadingState};

mod settings;
pub use settings::SettingsView;
