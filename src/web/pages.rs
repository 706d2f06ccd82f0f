use maud::{html, Markup};
use poem::web::{Data, Html, Query};
use poem::{handler, Result};

use crate::config::InputRanges;
use crate::dashboard::{Dashboard, MarketOverview, Snapshot};
use crate::dataset::HistoricalRecord;
use crate::features::FeatureVector;
use crate::prelude::*;
use crate::views::{DensityGrid, HeatmapGrid, SummaryStatistics};
use crate::web::partials::{document, format_thousands, HumanPrice, Price};
use crate::web::query::FeatureQuery;

#[handler]
#[instrument(skip_all)]
pub async fn get_index(
    Query(query): Query<FeatureQuery>,
    Data(dashboard): Data<&Arc<Dashboard>>,
) -> Result<Html<String>> {
    let config = dashboard.config();
    let features = query.or(config.inputs.defaults())?;

    // A failed recompute is shown on the page, the session keeps serving.
    let snapshot = dashboard.recompute(features).map_err(|error| {
        warn!(?features, "{:#}", error);
        error
    });

    let body = html! {
        section.section {
            div.container {
                div.columns {
                    div.column."is-8" {
                        div.box { (input_form(&config.inputs, &features)) }
                    }
                    div.column."is-4" {
                        @match &snapshot {
                            Ok(snapshot) => {
                                div.notification.is-info {
                                    p.heading { "Predicted market price" }
                                    p.title { (Price(snapshot.predicted_price)) }
                                }
                            }
                            Err(error) => {
                                div.notification.is-danger { (error.to_string()) }
                            }
                        }
                    }
                }

                h2.title."is-4" { "Market snapshot" }
                (market_cards(dashboard.market()))
                @if let Some(trendline) = &dashboard.market().trendline {
                    p.block {
                        "Historical trend at " (format_thousands(features.size)) " sq.ft: "
                        strong { (Price(trendline.at(features.size))) }
                        " (R² " (format!("{:.2}", trendline.r_squared)) ")"
                    }
                }

                @if let Ok(snapshot) = &snapshot {
                    div.columns {
                        div.column { (sweep_table(snapshot)) }
                        div.column { (heatmap_table(&snapshot.heatmap)) }
                    }
                }

                @if let Some(density) = &dashboard.market().density {
                    (density_table(density))
                }
            }
        }
    };
    Ok(Html(document("Real Estate Price Dashboard", body).into_string()))
}

#[handler]
#[instrument(skip_all)]
pub async fn get_dataset(Data(dashboard): Data<&Arc<Dashboard>>) -> Html<String> {
    let dataset = dashboard.dataset();
    let body = html! {
        section.section {
            div.container {
                h1.title { "Dataset" }
                p.subtitle { (dataset.len()) " records" }
                @if dataset.is_empty() {
                    div.notification.is-warning { "The dataset is empty." }
                } @else {
                    (records_table(dataset.records()))
                }
            }
        }
    };
    Html(document("Dataset", body).into_string())
}

fn records_table(records: &[HistoricalRecord]) -> Markup {
    let optional = |value: Option<f64>| value.map(format_thousands).unwrap_or_default();
    html! {
        div.table-container {
            table.table.is-striped.is-hoverable.is-fullwidth {
                thead { tr { th { "Size" } th { "Bedrooms" } th { "Bathrooms" } th { "Garage" } th { "Price" } } }
                tbody {
                    @for record in records {
                        tr {
                            td { (optional(record.size)) }
                            td { (optional(record.bedrooms)) }
                            td { (optional(record.bathrooms)) }
                            td { (optional(record.garage)) }
                            td { (optional(record.price)) }
                        }
                    }
                }
            }
        }
    }
}

fn input_form(inputs: &InputRanges, features: &FeatureVector) -> Markup {
    html! {
        form action="/" method="GET" {
            div.columns {
                div.column {
                    label.label for="size" { "Size (sq.ft)" }
                    input.input id="size" type="number" step="any" name="size" min=(inputs.size.min) max=(inputs.size.max) value=(features.size);
                }
                div.column {
                    label.label for="bedrooms" { "Bedrooms" }
                    input.input id="bedrooms" type="number" name="bedrooms" min=(inputs.bedrooms.min) max=(inputs.bedrooms.max) value=(features.bedrooms);
                }
                div.column {
                    label.label for="bathrooms" { "Bathrooms" }
                    input.input id="bathrooms" type="number" name="bathrooms" min=(inputs.bathrooms.min) max=(inputs.bathrooms.max) value=(features.bathrooms);
                }
                div.column {
                    label.label for="garage" { "Garage spaces" }
                    input.input id="garage" type="number" name="garage" min=(inputs.garage.min) max=(inputs.garage.max) value=(features.garage);
                }
            }
            button.button.is-link type="submit" { "Predict" }
        }
    }
}

fn market_cards(market: &MarketOverview) -> Markup {
    html! {
        @match &market.summary {
            Some(summary) => (summary_cards(summary)),
            None => div.notification.is-warning { "No market data: the dataset has no prices." },
        }
    }
}

fn summary_cards(summary: &SummaryStatistics) -> Markup {
    html! {
        nav.level.box {
            div.level-item.has-text-centered {
                div { p.heading { "Average price" } p.title { (HumanPrice(summary.mean_price)) } }
            }
            div.level-item.has-text-centered {
                div { p.heading { "Highest price" } p.title { (HumanPrice(summary.max_price)) } }
            }
            div.level-item.has-text-centered {
                div { p.heading { "Lowest price" } p.title { (HumanPrice(summary.min_price)) } }
            }
            @if let Some(mean_price_per_area) = summary.mean_price_per_area {
                div.level-item.has-text-centered {
                    div { p.heading { "Avg price per sq.ft" } p.title { (Price(mean_price_per_area)) } }
                }
            }
        }
    }
}

fn sweep_table(snapshot: &Snapshot) -> Markup {
    html! {
        div.box {
            h3.title."is-5" { "Predicted price vs " (snapshot.sweep.axis) }
            @if snapshot.sweep.is_empty() {
                p { "No swept values." }
            } @else {
                table.table.is-narrow.is-fullwidth {
                    thead { tr { th { (snapshot.sweep.axis) } th { "Predicted price" } } }
                    tbody {
                        @for (value, price) in &snapshot.sweep.points {
                            tr.is-selected[*price == snapshot.predicted_price] {
                                td { (format_thousands(*value)) }
                                td { (Price(*price)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn heatmap_table(grid: &HeatmapGrid) -> Markup {
    html! {
        div.box {
            h3.title."is-5" { "Price heatmap (" (grid.rows.feature) " vs " (grid.columns.feature) ")" }
            @if grid.is_empty() {
                p { "No candidate values." }
            } @else {
                div.table-container {
                    table.table.is-narrow {
                        thead {
                            tr {
                                th { (grid.rows.feature) " \\ " (grid.columns.feature) }
                                @for column in &grid.columns.values { th { (column) } }
                            }
                        }
                        tbody {
                            @for (row, cells) in grid.rows.values.iter().zip(&grid.cells) {
                                tr {
                                    th { (row) }
                                    @for price in cells { td { (HumanPrice(*price)) } }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn density_table(grid: &DensityGrid) -> Markup {
    html! {
        div.box {
            h3.title."is-5" { "Historical price density (" (grid.x_axis) " vs " (grid.y_axis) ")" }
            div.table-container {
                table.table.is-narrow {
                    thead {
                        tr {
                            th { (grid.y_axis) " \\ " (grid.x_axis) }
                            @for x in &grid.x_values { th { (x) } }
                        }
                    }
                    tbody {
                        @for (y, cells) in grid.y_values.iter().zip(&grid.cells) {
                            tr {
                                th { (y) }
                                @for cell in cells {
                                    td {
                                        @if let Some(value) = cell { (HumanPrice(*value)) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
