//! The embed-code page and the terminal navigator.

use paywiz_core::collaborators::Navigator;
use paywiz_sdk::config::EmbedConfig;
use paywiz_sdk::objects::Route;
use tokio::sync::watch;

/// Steps for pasting the snippet into a Tilda page.
pub const TILDA_STEPS: [&str; 4] = [
    "Войдите в редактор Tilda",
    "Добавьте блок \"HTML-код\" (T123)",
    "Вставьте код ниже",
    "Сохраните и опубликуйте страницу",
];

/// The `<iframe>` snippet embedding the wizard hosted at `embed.origin`.
pub fn iframe_snippet(embed: &EmbedConfig) -> String {
    let origin = embed.origin.as_str().trim_end_matches('/');
    format!(
        r#"<!-- Код для вставки формы оплаты -->
<iframe
  src="{origin}"
  style="width: 100%; min-height: 800px; border: none; border-radius: 12px;"
  title="Форма оплаты"
  frameborder="0"
  scrolling="auto"
></iframe>"#
    )
}

/// Route changes requested through [`Navigator`] land on a watch channel
/// the terminal loop observes.
pub struct TerminalNavigator {
    route_tx: watch::Sender<Route>,
}

impl TerminalNavigator {
    pub fn new(route_tx: watch::Sender<Route>) -> Self {
        Self { route_tx }
    }

    pub fn current(&self) -> Route {
        *self.route_tx.borrow()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate_to(&self, route: Route) {
        tracing::debug!(route = %route, "Navigating");
        self.route_tx.send_replace(route);
    }
}
