use crate::domain::GeocodedListing;
use maud::{html, Markup};

pub fn street_view_url(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps/@?api=1&map_action=pano&viewpoint={latitude},{longitude}")
}

/// Whole amounts print without decimals, everything else with two.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.fract() == 0.0 => format!("{p:.0}"),
        Some(p) => format!("{p:.2}"),
        None => "n/a".to_string(),
    }
}

pub fn listing_popup(row: &GeocodedListing) -> Markup {
    html! {
        b { (row.title) }
        br;
        "Price: $" (format_price(row.price))
        br;
        a href=(row.permalink) target="_blank" { "Link" }
        br;
        a href=(street_view_url(row.latitude, row.longitude)) target="_blank" { "Street View" }
    }
}
