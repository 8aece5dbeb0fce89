use serde::{Deserialize, Serialize};

/// Named pages a front end can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// The payment wizard itself.
    #[default]
    Payment,
    /// Embed-code instructions for site owners.
    Embed,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Payment => "/",
            Route::Embed => "/embed",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
