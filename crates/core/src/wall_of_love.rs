//! Wall of Love embeds: the public page that showcases a space's reviews.
//!
//! A wall is embedded by URL. Layout choices travel as query parameters so
//! the embed snippet can be regenerated from the URL alone.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use url::Url;

/// Column counts offered for the grid layout.
pub const GRID_COLUMN_OPTIONS: [u8; 3] = [2, 3, 4];

pub const DEFAULT_GRID_COLUMNS: u8 = 3;

/// Card height of the carousel layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CardHeight {
    /// Cards shrink to their content.
    Fit,
    /// Cards share the tallest card's height.
    #[default]
    Auto,
}

impl CardHeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fit => "fit",
            Self::Auto => "auto",
        }
    }

    /// Unknown values fall back to [`CardHeight::Auto`].
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("fit") => Self::Fit,
            _ => Self::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "layout", rename_all = "snake_case")]
#[ts(export)]
pub enum WallLayout {
    Grid { columns: u8 },
    Carousel { card_height: CardHeight },
}

impl Default for WallLayout {
    fn default() -> Self {
        Self::Grid {
            columns: DEFAULT_GRID_COLUMNS,
        }
    }
}

impl WallLayout {
    /// Build a layout from loose query values, clamping anything unknown to
    /// the defaults.
    pub fn from_params(layout: Option<&str>, columns: Option<u8>, height: Option<&str>) -> Self {
        match layout {
            Some("carousel") => Self::Carousel {
                card_height: CardHeight::parse(height),
            },
            _ => Self::Grid {
                columns: columns
                    .filter(|c| GRID_COLUMN_OPTIONS.contains(c))
                    .unwrap_or(DEFAULT_GRID_COLUMNS),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid { .. } => "grid",
            Self::Carousel { .. } => "carousel",
        }
    }
}

/// Embed URL of a space's wall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WallEmbed {
    #[ts(type = "string")]
    pub url: Url,
    pub layout: WallLayout,
}

impl WallEmbed {
    /// `{base}/wall/{slug}?layout=...`
    pub fn new(base_url: &Url, slug: &str, layout: WallLayout) -> Self {
        let mut url = base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["wall", slug]);
        }

        let mut embed = Self { url, layout };
        embed.set_layout(layout);
        embed
    }

    /// Switch the embed to `layout`, keeping unrelated query parameters.
    pub fn set_layout(&mut self, layout: WallLayout) {
        set_query_param(&mut self.url, "layout", layout.name());
        match layout {
            WallLayout::Grid { columns } => {
                remove_query_param(&mut self.url, "height");
                set_query_param(&mut self.url, "columns", &columns.to_string());
            }
            WallLayout::Carousel { card_height } => {
                remove_query_param(&mut self.url, "columns");
                set_query_param(&mut self.url, "height", card_height.as_str());
            }
        }
        self.layout = layout;
    }
}

/// Set one query parameter of `url`, replacing the first existing value or
/// appending it. Later duplicates of `key` are dropped.
pub fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter_map(|(name, current)| {
            if name != key {
                return Some((name, current));
            }
            if replaced {
                return None;
            }
            replaced = true;
            Some((name, value.to_string()))
        })
        .collect();
    if !replaced {
        pairs.push((key.to_string(), value.to_string()));
    }
    url.query_pairs_mut().clear().extend_pairs(pairs);
}

/// Remove every occurrence of `key` from the query of `url`.
pub fn remove_query_param(url: &mut Url, key: &str) {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .into_owned()
        .filter(|(name, _)| name != key)
        .collect();
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three_column_grid() {
        assert_eq!(WallLayout::default(), WallLayout::Grid { columns: 3 });
        assert_eq!(CardHeight::default(), CardHeight::Auto);
    }

    #[test]
    fn params_are_clamped() {
        assert_eq!(
            WallLayout::from_params(Some("grid"), Some(4), None),
            WallLayout::Grid { columns: 4 }
        );
        assert_eq!(
            WallLayout::from_params(None, Some(9), None),
            WallLayout::Grid { columns: 3 }
        );
        assert_eq!(
            WallLayout::from_params(Some("carousel"), None, Some("fit")),
            WallLayout::Carousel {
                card_height: CardHeight::Fit
            }
        );
        assert_eq!(
            WallLayout::from_params(Some("carousel"), None, Some("tall")),
            WallLayout::Carousel {
                card_height: CardHeight::Auto
            }
        );
        assert_eq!(
            WallLayout::from_params(Some("masonry"), None, None),
            WallLayout::default()
        );
    }

    fn base() -> Url {
        Url::parse("https://viewus.app/").unwrap()
    }

    #[test]
    fn embed_urls() {
        let embed = WallEmbed::new(&base(), "acme", WallLayout::default());
        assert_eq!(embed.url.as_str(), "https://viewus.app/wall/acme?layout=grid&columns=3");

        let embed = WallEmbed::new(
            &base(),
            "acme",
            WallLayout::Carousel {
                card_height: CardHeight::Auto,
            },
        );
        assert_eq!(
            embed.url.as_str(),
            "https://viewus.app/wall/acme?layout=carousel&height=auto"
        );
    }

    #[test]
    fn embed_under_a_base_path() {
        let base = Url::parse("https://example.com/viewus").unwrap();
        let embed = WallEmbed::new(&base, "acme", WallLayout::Grid { columns: 2 });
        assert_eq!(
            embed.url.as_str(),
            "https://example.com/viewus/wall/acme?layout=grid&columns=2"
        );
    }

    #[test]
    fn switching_layout_drops_the_other_layouts_option() {
        let mut embed = WallEmbed::new(&base(), "acme", WallLayout::Grid { columns: 4 });
        set_query_param(&mut embed.url, "title", "Our fans");

        embed.set_layout(WallLayout::Carousel {
            card_height: CardHeight::Fit,
        });
        let pairs: Vec<(String, String)> = embed.url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("layout".to_string(), "carousel".to_string()),
                ("title".to_string(), "Our fans".to_string()),
                ("height".to_string(), "fit".to_string()),
            ]
        );
    }

    #[test]
    fn set_query_param_replaces_or_appends() {
        let mut url = Url::parse("https://viewus.app/wall/acme?layout=grid&columns=3").unwrap();
        set_query_param(&mut url, "columns", "4");
        assert_eq!(url.as_str(), "https://viewus.app/wall/acme?layout=grid&columns=4");

        set_query_param(&mut url, "height", "fit");
        assert_eq!(
            url.as_str(),
            "https://viewus.app/wall/acme?layout=grid&columns=4&height=fit"
        );

        let mut url = Url::parse("https://viewus.app/wall/acme#top").unwrap();
        set_query_param(&mut url, "columns", "2");
        assert_eq!(url.as_str(), "https://viewus.app/wall/acme?columns=2#top");
    }

    #[test]
    fn query_values_are_encoded() {
        let mut url = Url::parse("https://viewus.app/wall/acme?layout=grid").unwrap();
        set_query_param(&mut url, "title", "Tom & Jerry #1");

        assert_eq!(url.query(), Some("layout=grid&title=Tom+%26+Jerry+%231"));
        assert_eq!(url.fragment(), None);
        let title = url
            .query_pairs()
            .find(|(name, _)| name == "title")
            .map(|(_, value)| value.into_owned());
        assert_eq!(title.as_deref(), Some("Tom & Jerry #1"));
    }

    #[test]
    fn remove_query_param_clears_empty_query() {
        let mut url = Url::parse("https://viewus.app/wall/acme?height=auto").unwrap();
        remove_query_param(&mut url, "height");
        assert_eq!(url.as_str(), "https://viewus.app/wall/acme");
    }

    #[test]
    fn serializes_with_layout_tag() {
        let json = serde_json::to_value(WallLayout::Grid { columns: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({"layout": "grid", "columns": 2}));
    }
}
