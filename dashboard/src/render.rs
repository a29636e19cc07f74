use analytics::AggregateView;
use chrono::Utc;
use maud::{html, Markup, DOCTYPE};
use redpulse_core::ScoredPost;

use crate::charts;
use crate::routes::SearchInputs;

pub const STYLESHEET: &str = include_str!("../assets/style.css");

/// Html page header.
fn render_html_head(page_title: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en";
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            meta name="color-scheme" content="dark";
            link rel="stylesheet" type="text/css" href="/assets/style.css";
            title { (page_title) }
        }
    }
}

/// The full dashboard page for one pipeline run.
pub fn dashboard_page(
    inputs: &SearchInputs,
    scored: &[ScoredPost],
    view: &AggregateView,
) -> Markup {
    html! {
        (render_html_head("Redpulse - Reddit Sentiment Dashboard"))
        body {
            div class="page" {
                header class="page__header" {
                    h1 { "Reddit Sentiment Dashboard" }
                    p class="subtitle" { "Sentiment trends and engagement from Reddit discussions" }
                }
                div class="page__columns" {
                    (render_sidebar(inputs))
                    main class="page__main" {
                        (render_metric_cards(view))
                        (render_tabs(inputs, scored, view))
                    }
                }
                (render_footer())
            }
        }
    }
}

pub fn error_page(message: &str) -> Markup {
    html! {
        (render_html_head("Redpulse - error"))
        body {
            div class="page" {
                header class="page__header" {
                    h1 { "Reddit Sentiment Dashboard" }
                }
                div class="error-box" {
                    h2 { "The run failed" }
                    p { (message) }
                    p { a href="/" { "Back to the dashboard" } }
                }
                (render_footer())
            }
        }
    }
}

/// Search parameter form; submitting re-runs the whole pipeline.
fn render_sidebar(inputs: &SearchInputs) -> Markup {
    html! {
        aside class="sidebar" {
            form method="get" action="/" {
                h2 { "Search Parameters" }
                label for="q" { "Keyword:" }
                input type="text" id="q" name="q" value=(inputs.query);

                label for="subreddit" { "Subreddit (optional):" }
                input type="text" id="subreddit" name="subreddit"
                    value=[inputs.subreddit.as_deref()];

                label for="limit" { "Number of posts:" }
                input type="range" id="limit" name="limit" min="10" max="100" step="1"
                    value=(inputs.limit)
                    oninput="this.nextElementSibling.textContent = this.value";
                output { (inputs.limit) }

                h2 { "Sentiment Thresholds" }
                label for="positive" { "Positive threshold:" }
                input type="range" id="positive" name="positive" min="0.1" max="1.0" step="0.05"
                    value=(inputs.thresholds.positive)
                    oninput="this.nextElementSibling.textContent = this.value";
                output { (inputs.thresholds.positive) }

                label for="negative" { "Negative threshold:" }
                input type="range" id="negative" name="negative" min="-1.0" max="-0.1" step="0.05"
                    value=(inputs.thresholds.negative)
                    oninput="this.nextElementSibling.textContent = this.value";
                output { (inputs.thresholds.negative) }

                button type="submit" { "Analyze" }
            }
        }
    }
}

fn render_metric_cards(view: &AggregateView) -> Markup {
    let sentiment_class = if view.mean_sentiment > 0.0 {
        "metric-card__value positive"
    } else if view.mean_sentiment < 0.0 {
        "metric-card__value negative"
    } else {
        "metric-card__value"
    };

    html! {
        div class="metric-cards" {
            div class="metric-card" {
                h3 { "Total Posts" }
                p class="metric-card__value accent" { (view.total_posts) }
            }
            div class="metric-card" {
                h3 { "Avg. Sentiment" }
                p class=(sentiment_class) { (format!("{:.2}", view.mean_sentiment)) }
            }
            div class="metric-card" {
                h3 { "Total Comments" }
                p class="metric-card__value" { (view.total_comments) }
            }
        }
    }
}

fn render_tabs(inputs: &SearchInputs, scored: &[ScoredPost], view: &AggregateView) -> Markup {
    html! {
        div class="tabs" {
            input type="radio" id="tab-charts" name="tab" checked;
            label for="tab-charts" { "Charts" }
            input type="radio" id="tab-clouds" name="tab";
            label for="tab-clouds" { "Word Clouds" }
            input type="radio" id="tab-tables" name="tab";
            label for="tab-tables" { "Data Tables" }

            section class="tab-panel panel-charts" {
                (render_charts_panel(inputs, scored, view))
            }
            section class="tab-panel panel-clouds" {
                (render_clouds_panel(view))
            }
            section class="tab-panel panel-tables" {
                (render_tables_panel(scored, view))
            }
        }
    }
}

fn render_charts_panel(inputs: &SearchInputs, scored: &[ScoredPost], view: &AggregateView) -> Markup {
    let scores: Vec<f64> = scored.iter().map(|p| p.sentiment).collect();

    html! {
        div class="panel-grid" {
            div class="panel-box" {
                h3 { "Sentiment Distribution" }
                (charts::histogram(&scores, inputs.thresholds))
            }
            div class="panel-box" {
                h3 { "Sentiment Over Time" }
                (charts::line_chart(&view.sentiment_over_time))
            }
        }
        div class="panel-box" {
            h3 { "Most Discussed Posts" }
            (charts::bar_rows(
                view.most_discussed
                    .iter()
                    .map(|p| (p.post.title.as_str(), p.post.num_comments)),
            ))
        }
    }
}

fn render_clouds_panel(view: &AggregateView) -> Markup {
    html! {
        div class="panel-grid" {
            div class="panel-box" {
                h3 { "Positive Sentiment" }
                (render_word_cloud(&view.positive_cloud, "cloud positive", "Not enough positive content"))
            }
            div class="panel-box" {
                h3 { "Negative Sentiment" }
                (render_word_cloud(&view.negative_cloud, "cloud negative", "Not enough negative content"))
            }
        }
    }
}

/// Frequency-sized words; a notice replaces an empty cloud.
fn render_word_cloud(words: &[analytics::WordCount], class: &str, empty_message: &str) -> Markup {
    if words.is_empty() {
        return charts::notice(empty_message);
    }
    let max = words.iter().map(|w| w.count).max().unwrap_or(1).max(1);

    html! {
        div class=(class) {
            @for word in words {
                @let size = 0.9 + 1.7 * word.count as f64 / max as f64;
                span style=(format!("font-size: {size:.2}rem")) title=(word.count) {
                    (word.word)
                }
            }
        }
    }
}

fn render_tables_panel(scored: &[ScoredPost], view: &AggregateView) -> Markup {
    html! {
        div class="panel-box" {
            h3 { "Raw Data" }
            @if scored.is_empty() {
                (charts::notice("No posts matched the search"))
            } @else {
                (render_posts_table(scored))
            }
        }
        div class="panel-box" {
            h3 { "Top Hashtags" }
            @if view.hashtags.is_empty() {
                (charts::notice("No hashtags found in the analyzed posts"))
            } @else {
                (charts::bar_rows(
                    view.hashtags.iter().map(|h| (h.tag.as_str(), h.count as u64)),
                ))
            }
        }
        div class="panel-grid" {
            div class="panel-box" {
                h3 { "Top Positive Posts" }
                (render_extremes_table(&view.top_positive))
            }
            div class="panel-box" {
                h3 { "Top Negative Posts" }
                (render_extremes_table(&view.top_negative))
            }
        }
    }
}

fn render_posts_table(scored: &[ScoredPost]) -> Markup {
    html! {
        table class="data-table" {
            thead {
                tr {
                    th { "Title" }
                    th { "Score" }
                    th { "Comments" }
                    th { "Sentiment" }
                    th { "Created (UTC)" }
                }
            }
            tbody {
                @for p in scored {
                    tr {
                        td { a href=(p.post.url) { (p.post.title) } }
                        td { (p.post.score) }
                        td { (p.post.num_comments) }
                        td class=(sentiment_cell_class(p.sentiment)) {
                            (format!("{:.2}", p.sentiment))
                        }
                        td { (p.post.created.format("%Y-%m-%d %H:%M")) }
                    }
                }
            }
        }
    }
}

fn render_extremes_table(posts: &[ScoredPost]) -> Markup {
    if posts.is_empty() {
        return charts::notice("No posts in this tail");
    }
    html! {
        table class="data-table" {
            thead {
                tr {
                    th { "Title" }
                    th { "Sentiment" }
                    th { "Comments" }
                }
            }
            tbody {
                @for p in posts {
                    tr {
                        td { (p.post.title) }
                        td class=(sentiment_cell_class(p.sentiment)) {
                            (format!("{:.2}", p.sentiment))
                        }
                        td { (p.post.num_comments) }
                    }
                }
            }
        }
    }
}

fn sentiment_cell_class(score: f64) -> &'static str {
    if score > 0.0 {
        "positive"
    } else if score < 0.0 {
        "negative"
    } else {
        ""
    }
}

fn render_footer() -> Markup {
    html! {
        footer class="page__footer" {
            p {
                "Redpulse • rendered at "
                (Utc::now().format("%Y-%m-%d %H:%M:%S"))
                " UTC"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::aggregate;
    use chrono::TimeZone;
    use redpulse_core::{Post, Thresholds};

    fn inputs() -> SearchInputs {
        SearchInputs {
            query: "AI".to_string(),
            subreddit: None,
            limit: 50,
            thresholds: Thresholds::default(),
        }
    }

    fn scored(title: &str, sentiment: f64) -> ScoredPost {
        ScoredPost {
            post: Post {
                id: "t3_x".to_string(),
                title: title.to_string(),
                body: String::new(),
                score: 3,
                num_comments: 7,
                url: "https://reddit.com/x".to_string(),
                created: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            },
            sentiment,
        }
    }

    #[test]
    fn empty_run_renders_a_full_page() {
        let view = aggregate(&[], Thresholds::default());
        let page = dashboard_page(&inputs(), &[], &view).into_string();
        assert!(page.contains("Total Posts"));
        assert!(page.contains("Not enough positive content"));
        assert!(page.contains("Not enough negative content"));
        assert!(page.contains("No hashtags found"));
        assert!(page.contains("No posts matched the search"));
        assert!(page.contains("0.00"));
    }

    #[test]
    fn populated_run_renders_charts_and_tables() {
        let batch = vec![
            scored("Loving #AI research", 0.8),
            scored("This is awful", -0.7),
        ];
        let view = aggregate(&batch, Thresholds::default());
        let page = dashboard_page(&inputs(), &batch, &view).into_string();
        assert!(page.contains("histogram"));
        assert!(page.contains("#AI"));
        assert!(page.contains("Loving #AI research"));
        assert!(page.contains("2024-05-01 12:00"));
    }

    #[test]
    fn word_cloud_sizes_grow_with_count() {
        let words = vec![
            analytics::WordCount {
                word: "rust".to_string(),
                count: 4,
            },
            analytics::WordCount {
                word: "tokio".to_string(),
                count: 1,
            },
        ];
        let markup = render_word_cloud(&words, "cloud positive", "empty").into_string();
        assert!(markup.contains("font-size: 2.60rem"));
        assert!(markup.contains("rust"));
    }

    #[test]
    fn form_preserves_current_inputs() {
        let view = aggregate(&[], Thresholds::default());
        let mut current = inputs();
        current.query = "rustlang".to_string();
        current.subreddit = Some("rust".to_string());
        let page = dashboard_page(&current, &[], &view).into_string();
        assert!(page.contains("value=\"rustlang\""));
        assert!(page.contains("value=\"rust\""));
    }

    #[test]
    fn error_page_shows_message_and_link_home() {
        let page = error_page("Authentication failed: invalid client id or secret").into_string();
        assert!(page.contains("Authentication failed"));
        assert!(page.contains("href=\"/\""));
    }
}
