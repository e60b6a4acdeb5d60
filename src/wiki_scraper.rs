use log::{error, info};
use scraper::{ElementRef, Html, Selector};

use crate::cards::card::Card;
use crate::cards::field::CardField;
use crate::utilities::string_manipulators::sanitize_cell_text;
use crate::BoxError;

/// Scrapes one card's attribute table from its Duel Masters wiki page.
#[derive(Debug, Clone)]
pub struct WikiCardScraper {
    base_url: String,
    client: reqwest::Client,
}

impl WikiCardScraper {
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        WikiCardScraper {
            base_url: base_url.to_string(),
            client,
        }
    }

    /// Wiki page paths use underscores for spaces. Nothing else is
    /// escaped; names with other special characters go through as-is.
    fn page_path(name: &str) -> String {
        name.replace(' ', "_")
    }

    /// Fetches the card's wiki page and extracts its record. Every
    /// fetch failure collapses into a single "Card not found" error;
    /// the underlying cause is only logged.
    pub async fn fetch_card(&self, name: &str) -> Result<Card, BoxError> {
        let url = format!("{}/wiki/{}", self.base_url, Self::page_path(name));
        info!("Fetching card page: {}", url);

        let response = match self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
        {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to fetch card page {}: {}", url, e);
                return Err("Card not found".into());
            }
        };

        let html = match response.text().await {
            Ok(html) => html,
            Err(e) => {
                error!("Failed to read card page {}: {}", url, e);
                return Err("Card not found".into());
            }
        };

        Ok(parse_card_page(&html, name))
    }
}

/// Walks the page's data table and assembles the card record. A page
/// without a body, table or rows yields the default record with only
/// `name` set; parse anomalies never fail the operation.
pub fn parse_card_page(html: &str, name: &str) -> Card {
    let document = Html::parse_document(html);
    let mut card = Card::new(name);

    let body_selector = Selector::parse("body").unwrap();
    let table_selector = Selector::parse(".wikitable").unwrap();
    let row_selector = Selector::parse("tr").unwrap();

    let table = document
        .select(&body_selector)
        .next()
        .and_then(|body| body.select(&table_selector).next());

    if let Some(table) = table {
        // Document order; a repeated label overwrites the earlier value.
        for (index, row) in table.select(&row_selector).enumerate() {
            if let Some((field, value)) = parse_row(row, index) {
                card.set_field(field, value);
            }
        }
    }

    card
}

/// Classifies one table row and extracts its (field, value) pair.
///
/// Header rows and rows with unmapped labels yield nothing. A row that
/// is not a two-cell label/value pair is only meaningful as the artwork
/// row: the template puts the card image at row index 1, right under
/// the title header, so the image rule is tied to that position and
/// must not match images anywhere else.
pub fn parse_row(row: ElementRef, index: usize) -> Option<(CardField, String)> {
    let header_selector = Selector::parse("th").unwrap();
    if row.select(&header_selector).next().is_some() {
        return None;
    }

    let cell_selector = Selector::parse("td").unwrap();
    let cells: Vec<ElementRef> = row.select(&cell_selector).collect();

    if cells.len() != 2 {
        if index != 1 {
            return None;
        }
        let image_selector = Selector::parse("img").unwrap();
        let img = row.select(&image_selector).next()?;
        let src = img.value().attr("src").unwrap_or("").to_string();
        return Some((CardField::Image, src));
    }

    let label_selector = Selector::parse("a span").unwrap();
    let label = cells[0]
        .select(&label_selector)
        .next()
        .map(|element| element.text().collect::<String>())
        .unwrap_or_default();

    let field = CardField::from_label(&label)?;
    let value = sanitize_cell_text(&cells[1].text().collect::<String>());

    Some((field, value))
}
