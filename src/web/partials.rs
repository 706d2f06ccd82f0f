use clap::crate_version;
use human_repr::HumanCount;
use maud::{html, Markup, Render, DOCTYPE};

use crate::features::Feature;

/// Price in PKR, rounded to the whole rupee.
pub struct Price(pub f64);

impl Render for Price {
    fn render(&self) -> Markup {
        html! { "PKR " (format_thousands(self.0)) }
    }
}

/// Compact price for the KPI cards, the exact amount in the tooltip.
pub struct HumanPrice(pub f64);

impl Render for HumanPrice {
    fn render(&self) -> Markup {
        html! {
            span title=(format_thousands(self.0)) { "PKR " (self.0.human_count_bare().to_string()) }
        }
    }
}

impl Render for Feature {
    fn render(&self) -> Markup {
        html! { (self.name()) }
    }
}

/// Formats with comma-separated thousands and no decimals.
pub fn format_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut formatted = String::with_capacity(rounded.len() + rounded.len() / 3 + 1);
    if value.round() < 0.0 {
        formatted.push('-');
    }
    for (i, digit) in rounded.chars().enumerate() {
        if i != 0 && (rounded.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

pub fn document(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta charset="UTF-8";
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css" crossorigin="anonymous" referrerpolicy="no-referrer";
                title { (title) }
            }
            body {
                nav.navbar.has-shadow role="navigation" aria-label="main navigation" {
                    div.navbar-brand {
                        a.navbar-item href="/" { strong { "Real Estate Price Dashboard (PKR)" } }
                        a.navbar-item href="/dataset" { "Dataset" }
                    }
                }
                (body)
                (footer())
            }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer.footer {
            div.content.has-text-centered {
                p { "House Price Dashboard " (crate_version!()) }
            }
        }
    }
}
