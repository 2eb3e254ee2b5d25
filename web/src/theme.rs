use serde::{Deserialize, Serialize};

use crate::utils::*;

/// Two-valued display theme, persisted and applied as a `data-theme`
/// attribute on the document root. The palette CSS variables resolve against
/// it; the engine never sees anything but logical color slots.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const fn scheme(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
        }
    }

    pub(crate) const fn toggled(self) -> Self {
        use Theme::*;
        match self {
            Light => Dark,
            Dark => Light,
        }
    }

    fn update_html(self) {
        use gloo::utils::document;
        let html = document()
            .query_selector("html")
            .expect("query must be correct")
            .expect("must have html element");
        let scheme = self.scheme();
        log::debug!("theme-scheme: {}", scheme);
        if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
            log::error!("failed to set theme: {:?}", err);
        }
    }

    pub(crate) fn init() -> Self {
        let theme = Self::local_or_default();
        theme.update_html();
        theme
    }

    pub(crate) fn apply(self) {
        self.local_save();
        self.update_html();
    }
}

impl Default for Theme {
    // first visit starts dark
    fn default() -> Self {
        Self::Dark
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "acidgrid:theme";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_visit_defaults_to_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::default().scheme(), "dark");
    }

    #[test]
    fn toggling_flips_between_the_two_schemes() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
