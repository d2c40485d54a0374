use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Metadata-bag keys under which extracted fields are stored.
pub const META_PRODUCT_TITLE: &str = "product.title";
pub const META_PRICE: &str = "product.price";
pub const META_IMAGE_URL: &str = "product.imageUrl";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductRecord {
    pub title: String,
    pub price: f64,
    pub image_url: String,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExtractError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),
    #[error("no product data found: missing {missing}")]
    NoProductData { missing: &'static str },
}

impl ProductRecord {
    /// Flatten the record into the string-keyed metadata bag the crawler
    /// pipeline persists for each fetched page.
    pub fn into_metadata(self) -> BTreeMap<String, String> {
        let mut metadata = BTreeMap::new();
        metadata.insert(META_PRODUCT_TITLE.to_string(), self.title);
        metadata.insert(META_PRICE.to_string(), format!("{:.2}", self.price));
        metadata.insert(META_IMAGE_URL.to_string(), self.image_url);
        metadata
    }
}

/// Extract product fields from a page snapshot.
///
/// The source URL is carried as context only: product pages are served under
/// many category paths, so every field comes from the byte content. Candidate
/// markup locations are probed in a fixed order to keep the result
/// deterministic across template variants.
pub fn extract_product(
    bytes: &[u8],
    content_type: &str,
    source_url: &str,
) -> Result<ProductRecord, ExtractError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    if !mime.eq_ignore_ascii_case("text/html") {
        return Err(ExtractError::UnsupportedContentType(
            content_type.to_string(),
        ));
    }

    // Lossy decode: a truncated or badly encoded snapshot must degrade into
    // a failed field lookup, never a crash.
    let html = String::from_utf8_lossy(bytes);
    let document = Html::parse_document(&html);

    let title = match extract_title(&document) {
        Some(title) => title,
        None => {
            log::debug!("no title found for {}", source_url);
            return Err(ExtractError::NoProductData { missing: "title" });
        }
    };

    let price = match extract_price(&document) {
        Some(price) => price,
        None => {
            log::debug!("no price found for {}", source_url);
            return Err(ExtractError::NoProductData { missing: "price" });
        }
    };

    let image_url = match extract_image_url(&document) {
        Some(image_url) => image_url,
        None => {
            log::debug!("no product image found for {}", source_url);
            return Err(ExtractError::NoProductData { missing: "image" });
        }
    };

    Ok(ProductRecord {
        title,
        price,
        image_url,
    })
}

/// Collapse every run of whitespace to a single space and trim.
///
/// This is the one normalization rule for extracted text. Corpus
/// expectations are written in the same form, so title comparison stays an
/// exact string match.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_title(document: &Html) -> Option<String> {
    // Current product template
    let prod_name_selector = Selector::parse("#product-detail h1.prod-name").unwrap();
    if let Some(element) = document.select(&prod_name_selector).next() {
        let title = normalize_text(&element.text().collect::<String>());
        if !title.is_empty() {
            return Some(title);
        }
    }

    // Legacy table-layout template
    let prodtitle_selector = Selector::parse("td.prodtitle").unwrap();
    if let Some(element) = document.select(&prodtitle_selector).next() {
        let title = normalize_text(&element.text().collect::<String>());
        if !title.is_empty() {
            return Some(title);
        }
    }

    // Last resort: the document title minus the site suffix. Some product
    // pages carry no dedicated title node at all.
    let title_selector = Selector::parse("title").unwrap();
    if let Some(element) = document.select(&title_selector).next() {
        let page_title = normalize_text(&element.text().collect::<String>());
        let stripped = strip_site_suffix(&page_title);
        if !stripped.is_empty() {
            log::debug!("falling back to document title: {}", stripped);
            return Some(stripped.to_string());
        }
    }

    None
}

fn strip_site_suffix(title: &str) -> &str {
    for suffix in [" - J.Crew", " | J.Crew", " - jcrew.com"] {
        if let Some(stripped) = title.strip_suffix(suffix) {
            return stripped.trim_end();
        }
    }
    title
}

fn extract_price(document: &Html) -> Option<f64> {
    // Sale price wins over list price when both are shown. Sold-out pages
    // drop the sale block but keep the nominal list price.
    let price_selectors = [
        "#product-detail span.price-sale",
        "#product-detail span.price-list",
        ".prod-price",
    ];

    for selector_str in price_selectors {
        let selector = Selector::parse(selector_str).unwrap();
        if let Some(element) = document.select(&selector).next() {
            let text = element.text().collect::<String>();
            if let Some(price) = parse_price(&text) {
                log::debug!("price {} matched {}", price, selector_str);
                return Some(price);
            }
        }
    }

    None
}

/// Parse a displayed price such as "$128.00" or "was $325.00".
///
/// Returns None unless the text yields a strictly positive decimal; a zero
/// or unparseable price counts as a missing field.
fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let value: f64 = cleaned.replace(',', "").parse().ok()?;

    if value > 0.0 {
        Some(value)
    } else {
        None
    }
}

fn extract_image_url(document: &Html) -> Option<String> {
    let prod_image_selector = Selector::parse("img#prod-image").unwrap();
    if let Some(element) = document.select(&prod_image_selector).next() {
        if let Some(src) = element.value().attr("src") {
            let src = src.trim();
            if !src.is_empty() {
                return Some(src.to_string());
            }
        }
    }

    let og_image_selector = Selector::parse(r#"meta[property="og:image"]"#).unwrap();
    if let Some(element) = document.select(&og_image_selector).next() {
        if let Some(content) = element.value().attr("content") {
            let content = content.trim();
            if !content.is_empty() {
                return Some(content.to_string());
            }
        }
    }

    None
}
