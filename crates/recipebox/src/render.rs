//! HTML rendering of recipes.
//!
//! All user-supplied text passes through [`escape_html`] before it is placed
//! in markup, including attribute values. Image URLs are additionally limited
//! to `http`/`https`.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::CatalogConfig;
use crate::recipe::{non_blank_lines, Recipe};

/// Image shown on cards for recipes without a usable image.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1495521821757-a1efb6729352?w=400";

/// Default number of description characters shown on a card.
pub const DEFAULT_DESCRIPTION_PREVIEW_CHARS: usize = 100;

const NO_DESCRIPTION: &str = "No description provided";
const EMPTY_STATE: &str = "No recipes yet. Add your first recipe to get started!";

/// Escape text for use in HTML element content or a quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Turn multi-line text into one `<p>` per non-blank line.
///
/// Blank lines are dropped rather than kept as spacing. Each line is escaped.
#[must_use]
pub fn format_text(text: &str) -> String {
    non_blank_lines(text)
        .map(|line| format!("<p>{}</p>", escape_html(line)))
        .collect()
}

fn web_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^https?://\S+$").expect("valid URL regex"))
}

/// Check whether `url` is an absolute `http`/`https` URL without whitespace.
#[must_use]
pub fn is_web_url(url: &str) -> bool {
    web_url_regex().is_match(url)
}

/// Produces card, detail and page markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    placeholder_image: String,
    description_preview_chars: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            description_preview_chars: DEFAULT_DESCRIPTION_PREVIEW_CHARS,
        }
    }
}

impl Renderer {
    /// A renderer with the default placeholder and preview length.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer configured from the catalog settings.
    #[must_use]
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            placeholder_image: config.placeholder_image.clone(),
            description_preview_chars: config.description_preview_chars,
        }
    }

    /// Override the placeholder image.
    #[must_use]
    pub fn with_placeholder_image(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image = url.into();
        self
    }

    /// Override the number of description characters shown on cards.
    #[must_use]
    pub fn with_description_preview_chars(mut self, chars: usize) -> Self {
        self.description_preview_chars = chars;
        self
    }

    /// Card summary for the listing.
    #[must_use]
    pub fn render_card(&self, recipe: &Recipe) -> String {
        let image = recipe
            .image()
            .filter(|url| is_web_url(url))
            .unwrap_or(self.placeholder_image.as_str());
        let description = recipe
            .description()
            .map_or_else(|| NO_DESCRIPTION.to_string(), |d| self.preview(d));
        let name = escape_html(&recipe.name);

        format!(
            concat!(
                r#"<div class="recipe-card" data-recipe-id="{id}">"#,
                r#"<img class="recipe-image" src="{image}" alt="{name}">"#,
                r#"<div class="recipe-card-content">"#,
                r#"<span class="recipe-category">{category}</span>"#,
                r#"<h3 class="recipe-title">{name}</h3>"#,
                r#"<p class="recipe-description">{description}</p>"#,
                r#"<div class="recipe-card-buttons">"#,
                r#"<button class="btn btn-small btn-primary" data-action="view" data-recipe-id="{id}">View Recipe</button>"#,
                r#"<button class="btn btn-small btn-danger" data-action="delete" data-recipe-id="{id}">Delete</button>"#,
                "</div></div></div>",
            ),
            id = recipe.id,
            image = escape_html(image),
            name = name,
            category = escape_html(&recipe.category),
            description = escape_html(&description),
        )
    }

    /// Full detail view.
    #[must_use]
    pub fn render_detail(&self, recipe: &Recipe) -> String {
        let name = escape_html(&recipe.name);

        let image = recipe
            .image()
            .filter(|url| is_web_url(url))
            .map(|url| {
                format!(
                    r#"<img src="{}" alt="{name}" class="recipe-detail-image">"#,
                    escape_html(url)
                )
            })
            .unwrap_or_default();
        let description = recipe
            .description()
            .map(|d| format!(r#"<p class="recipe-description-full">{}</p>"#, escape_html(d)))
            .unwrap_or_default();

        format!(
            concat!(
                r#"<div class="recipe-detail" data-recipe-id="{id}">"#,
                "{image}",
                "<h2>{name}</h2>",
                r#"<p class="recipe-category-badge">{category}</p>"#,
                "{description}",
                "<h3>Ingredients</h3>",
                r#"<div class="recipe-ingredients">{ingredients}</div>"#,
                "<h3>Instructions</h3>",
                r#"<div class="recipe-instructions">{instructions}</div>"#,
                "</div>",
            ),
            id = recipe.id,
            image = image,
            name = name,
            category = escape_html(&recipe.category),
            description = description,
            ingredients = format_text(&recipe.ingredients),
            instructions = format_text(&recipe.instructions),
        )
    }

    /// Listing grid, or the empty-state block when there is nothing to show.
    #[must_use]
    pub fn render_grid(&self, recipes: &[Recipe]) -> String {
        if recipes.is_empty() {
            return format!(r#"<div id="empty-state" class="empty-state"><p>{EMPTY_STATE}</p></div>"#);
        }

        let cards: String = recipes.iter().map(|r| self.render_card(r)).collect();
        format!(r#"<div id="recipe-grid" class="recipe-grid">{cards}</div>"#)
    }

    /// A standalone HTML document containing the listing.
    #[must_use]
    pub fn render_page(&self, title: &str, recipes: &[Recipe]) -> String {
        let title = escape_html(title);
        format!(
            concat!(
                "<!DOCTYPE html>\n",
                r#"<html lang="en">"#,
                "\n<head>\n",
                r#"<meta charset="UTF-8">"#,
                "\n",
                r#"<meta name="viewport" content="width=device-width, initial-scale=1.0">"#,
                "\n<title>{title}</title>\n",
                "</head>\n<body>\n",
                "<main>\n<h1>{title}</h1>\n{grid}\n</main>\n",
                "</body>\n</html>\n",
            ),
            title = title,
            grid = self.render_grid(recipes),
        )
    }

    fn preview(&self, description: &str) -> String {
        let limit = self.description_preview_chars;
        if description.chars().count() <= limit {
            return description.to_string();
        }
        let cut: String = description.chars().take(limit).collect();
        format!("{}...", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::RecipeDraft;

    fn soup() -> Recipe {
        Recipe::from_draft(
            42,
            RecipeDraft {
                name: "Soup".to_string(),
                category: "Dinner".to_string(),
                description: None,
                ingredients: "water\nsalt".to_string(),
                instructions: "boil".to_string(),
                image: None,
            },
        )
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_format_text_splits_lines() {
        assert_eq!(format_text("water\nsalt"), "<p>water</p><p>salt</p>");
    }

    #[test]
    fn test_format_text_drops_blank_lines() {
        assert_eq!(format_text("a\n\n   \r\nb\n"), "<p>a</p><p>b</p>");
        assert_eq!(format_text(""), "");
    }

    #[test]
    fn test_format_text_escapes_lines() {
        assert_eq!(format_text("1 < 2"), "<p>1 &lt; 2</p>");
    }

    #[test]
    fn test_is_web_url() {
        assert!(is_web_url("https://example.com/a.jpg"));
        assert!(is_web_url("HTTP://example.com"));
        assert!(!is_web_url("javascript:alert(1)"));
        assert!(!is_web_url("data:image/png;base64,AAAA"));
        assert!(!is_web_url("https://example.com/a b.jpg"));
    }

    #[test]
    fn test_card_contains_summary_and_actions() {
        let card = Renderer::new().render_card(&soup());

        assert!(card.contains(r#"<h3 class="recipe-title">Soup</h3>"#));
        assert!(card.contains(r#"<span class="recipe-category">Dinner</span>"#));
        assert!(card.contains(NO_DESCRIPTION));
        assert!(card.contains(r#"data-action="view" data-recipe-id="42""#));
        assert!(card.contains(r#"data-action="delete" data-recipe-id="42""#));
    }

    #[test]
    fn test_card_uses_placeholder_without_image() {
        let card = Renderer::new().render_card(&soup());
        assert!(card.contains(&escape_html(DEFAULT_PLACEHOLDER_IMAGE)));
    }

    #[test]
    fn test_card_uses_placeholder_for_unsafe_image() {
        let mut recipe = soup();
        recipe.image = Some("javascript:alert(1)".to_string());

        let card = Renderer::new()
            .with_placeholder_image("https://example.com/none.png")
            .render_card(&recipe);
        assert!(!card.contains("javascript:"));
        assert!(card.contains("https://example.com/none.png"));
    }

    #[test]
    fn test_card_uses_recipe_image() {
        let mut recipe = soup();
        recipe.image = Some("https://example.com/soup.jpg?w=1&h=2".to_string());

        let card = Renderer::new().render_card(&recipe);
        assert!(card.contains(r#"src="https://example.com/soup.jpg?w=1&amp;h=2""#));
    }

    #[test]
    fn test_card_truncates_description() {
        let mut recipe = soup();
        recipe.description = Some("abcdefghij klmnop".to_string());

        let card = Renderer::new()
            .with_description_preview_chars(11)
            .render_card(&recipe);
        assert!(card.contains(r#"<p class="recipe-description">abcdefghij...</p>"#));
    }

    #[test]
    fn test_card_keeps_short_description() {
        let mut recipe = soup();
        recipe.description = Some("Warm and salty".to_string());

        let card = Renderer::new().render_card(&recipe);
        assert!(card.contains(r#"<p class="recipe-description">Warm and salty</p>"#));
    }

    #[test]
    fn test_card_escapes_user_text() {
        let mut recipe = soup();
        recipe.name = "<img src=x onerror=alert(1)>".to_string();
        recipe.category = "\"><script>".to_string();
        recipe.description = Some("<b>bold</b>".to_string());

        let card = Renderer::new().render_card(&recipe);
        assert!(!card.contains("<img src=x"));
        assert!(!card.contains("<script>"));
        assert!(!card.contains("<b>"));
        assert!(card.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(card.contains(r#"alt="&lt;img src=x onerror=alert(1)&gt;""#));
    }

    #[test]
    fn test_detail_splits_ingredients_into_blocks() {
        let detail = Renderer::new().render_detail(&soup());

        assert!(detail.contains(r#"<div class="recipe-ingredients"><p>water</p><p>salt</p></div>"#));
        assert!(detail.contains(r#"<div class="recipe-instructions"><p>boil</p></div>"#));
        assert!(detail.contains("<h2>Soup</h2>"));
        assert!(detail.contains(r#"<p class="recipe-category-badge">Dinner</p>"#));
    }

    #[test]
    fn test_detail_omits_absent_optionals() {
        let detail = Renderer::new().render_detail(&soup());

        assert!(!detail.contains("recipe-detail-image"));
        assert!(!detail.contains("recipe-description-full"));
    }

    #[test]
    fn test_detail_includes_present_optionals() {
        let mut recipe = soup();
        recipe.description = Some("A very long description that is never truncated in the detail view because it is the full view".to_string());
        recipe.image = Some("https://example.com/soup.jpg".to_string());

        let detail = Renderer::new()
            .with_description_preview_chars(5)
            .render_detail(&recipe);
        assert!(detail.contains(r#"<img src="https://example.com/soup.jpg" alt="Soup" class="recipe-detail-image">"#));
        assert!(detail.contains("is the full view</p>"));
    }

    #[test]
    fn test_detail_escapes_user_text() {
        let mut recipe = soup();
        recipe.ingredients = "<script>steal()</script>\nsalt".to_string();
        recipe.description = Some("<iframe>".to_string());

        let detail = Renderer::new().render_detail(&recipe);
        assert!(!detail.contains("<script>"));
        assert!(!detail.contains("<iframe>"));
        assert!(detail.contains("<p>&lt;script&gt;steal()&lt;/script&gt;</p><p>salt</p>"));
    }

    #[test]
    fn test_grid_empty_state() {
        let grid = Renderer::new().render_grid(&[]);
        assert!(grid.contains("empty-state"));
        assert!(!grid.contains("recipe-card"));
    }

    #[test]
    fn test_grid_keeps_order() {
        let first = soup();
        let mut second = soup();
        second.id = 43;
        second.name = "Stew".to_string();

        let grid = Renderer::new().render_grid(&[first, second]);
        let soup_at = grid.find("Soup").unwrap();
        let stew_at = grid.find("Stew").unwrap();
        assert!(soup_at < stew_at);
        assert_eq!(grid.matches(r#"class="recipe-card""#).count(), 2);
    }

    #[test]
    fn test_page_is_standalone_document() {
        let page = Renderer::new().render_page("My <Recipes>", &[soup()]);

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>My &lt;Recipes&gt;</title>"));
        assert!(page.contains("<h1>My &lt;Recipes&gt;</h1>"));
        assert!(page.contains("recipe-grid"));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_from_config() {
        let mut config = CatalogConfig::default();
        config.placeholder_image = "https://example.com/p.png".to_string();
        config.description_preview_chars = 3;

        let renderer = Renderer::from_config(&config);
        assert_eq!(
            renderer,
            Renderer::new()
                .with_placeholder_image("https://example.com/p.png")
                .with_description_preview_chars(3)
        );
    }
}
