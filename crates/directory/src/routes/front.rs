//! Listing page: the browser table over `/api/advocates` semantics.
//!
//! All filter state is carried in the URL. Submitting the search form sends
//! `q` without `offset`, so a new search always starts at the first page.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use super::helpers::{fetch_page, html_escape, listing_params};
use crate::error::AppResult;
use crate::listing::{ListingView, RawListingQuery, SortKey};
use crate::state::AppState;

/// Template rendered for the listing page.
pub const LISTING_TEMPLATE: &str = "listing.html";

/// Create the listing page router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(listing_page))
}

/// A sortable column header.
#[derive(Debug, Serialize)]
struct SortLink {
    label: &'static str,
    url: String,
    active: bool,
    order: &'static str,
}

async fn listing_page(
    State(state): State<AppState>,
    query: Result<Query<RawListingQuery>, QueryRejection>,
) -> AppResult<Html<String>> {
    let params = listing_params(query);
    let page = fetch_page(&state, &params).await?;
    let view = ListingView::from_page(page);

    let context = listing_context(&view);
    match state.theme().render(LISTING_TEMPLATE, &context) {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            tracing::error!(error = %e, "failed to render listing template");
            Ok(Html(render_fallback_listing(&view)))
        }
    }
}

fn sort_links(view: &ListingView) -> Vec<SortLink> {
    [
        (SortKey::FirstName, "First Name"),
        (SortKey::LastName, "Last Name"),
        (SortKey::City, "City"),
    ]
    .into_iter()
    .map(|(key, label)| SortLink {
        label,
        url: view.sort_url(key),
        active: view.params().sort == key,
        order: view.params().order.as_str(),
    })
    .collect()
}

fn listing_context(view: &ListingView) -> tera::Context {
    let params = view.params();

    let mut context = tera::Context::new();
    context.insert("advocates", view.records());
    context.insert("search_text", view.search_text());
    context.insert("total", &view.total());
    context.insert("page", &view.page_number());
    context.insert("total_pages", &view.page_count());
    context.insert("prev_url", &view.prev_offset().map(|o| view.page_url(o)));
    context.insert("next_url", &view.next_offset().map(|o| view.page_url(o)));
    context.insert("reset_url", &view.reset_url());
    context.insert("sort_links", &sort_links(view));
    context.insert("sort", params.sort.as_str());
    context.insert("order", params.order.as_str());
    context.insert("limit", &params.limit);
    context
}

/// Plain HTML used when the template cannot be rendered.
fn render_fallback_listing(view: &ListingView) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Advocates</title>
</head>
<body>
<h1>Advocates</h1>
"#,
    );

    let params = view.params();
    html.push_str(&format!(
        r#"<form method="get" action="/">
<input type="search" name="q" value="{}" placeholder="Search advocates...">
<input type="hidden" name="sort" value="{}">
<input type="hidden" name="order" value="{}">
<input type="hidden" name="limit" value="{}">
<button type="submit">Search</button> <a href="{}">Reset Search</a>
</form>
"#,
        html_escape(view.search_text()),
        params.sort.as_str(),
        params.order.as_str(),
        params.limit,
        html_escape(&view.reset_url()),
    ));

    html.push_str(&format!("<p>{} advocates</p>\n<table>\n<thead><tr>", view.total()));
    for link in sort_links(view) {
        html.push_str(&format!(
            r#"<th><a href="{}">{}</a></th>"#,
            html_escape(&link.url),
            link.label
        ));
    }
    html.push_str(
        "<th>Degree</th><th>Specialties</th><th>Years of Experience</th><th>Phone Number</th></tr></thead>\n<tbody>\n",
    );

    for advocate in view.records() {
        let specialties: Vec<String> = advocate
            .specialties
            .iter()
            .map(|s| format!("<div>{}</div>", html_escape(s)))
            .collect();
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&advocate.first_name),
            html_escape(&advocate.last_name),
            html_escape(&advocate.city),
            html_escape(&advocate.degree),
            specialties.join(""),
            advocate.years_of_experience,
            html_escape(&advocate.display_phone()),
        ));
    }
    html.push_str("</tbody>\n</table>\n");

    if let Some(offset) = view.prev_offset() {
        html.push_str(&format!(
            r#"<a href="{}">Previous</a> "#,
            html_escape(&view.page_url(offset))
        ));
    }
    if let Some(offset) = view.next_offset() {
        html.push_str(&format!(
            r#"<a href="{}">Next</a>"#,
            html_escape(&view.page_url(offset))
        ));
    }
    html.push_str("\n</body>\n</html>\n");
    html
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::listing::{ListingPage, ListingParams};
    use crate::models::Advocate;
    use crate::theme::ThemeEngine;

    fn view() -> ListingView {
        ListingView::from_page(ListingPage {
            records: vec![Advocate {
                id: 1,
                first_name: "Ann".to_string(),
                last_name: "<Lee>".to_string(),
                city: "Austin".to_string(),
                degree: "MD".to_string(),
                specialties: vec!["Grief".to_string()],
                years_of_experience: 9,
                phone_number: Some(5125550100),
                created_at: chrono::DateTime::from_timestamp(0, 0).unwrap(),
            }],
            total: 60,
            params: ListingParams {
                q: Some("ann".to_string()),
                ..Default::default()
            },
        })
    }

    #[test]
    fn fallback_escapes_and_formats() {
        let html = render_fallback_listing(&view());
        assert!(html.contains("&lt;Lee&gt;"));
        assert!(!html.contains("<Lee>"));
        assert!(html.contains("512-555-0100"));
        assert!(html.contains(r#"value="ann""#));
        assert!(html.contains("<div>Grief</div>"));
        assert!(html.contains("offset=50"), "next link expected: {html}");
        assert!(!html.contains("Previous"));
    }

    #[test]
    fn search_form_omits_offset() {
        let html = render_fallback_listing(&view());
        assert!(!html.contains(r#"name="offset""#));
    }

    #[test]
    fn context_renders_with_project_template() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");
        let theme = ThemeEngine::new(&dir).unwrap();
        let html = theme.render(LISTING_TEMPLATE, &listing_context(&view())).unwrap();

        assert!(html.contains("512-555-0100"));
        assert!(html.contains("&lt;Lee&gt;"));
        assert!(html.contains("Grief"));
        assert!(html.contains("Page 1 of 2"));
    }

    #[test]
    fn rows_returned_by_the_server_are_all_rendered() {
        // Postgres case folding can match rows the in-memory predicate misses
        let view = ListingView::from_page(ListingPage {
            records: vec![Advocate {
                id: 2,
                first_name: "STRASSE".to_string(),
                last_name: "Ober".to_string(),
                city: "Bonn".to_string(),
                degree: "MD".to_string(),
                specialties: Vec::new(),
                years_of_experience: 3,
                phone_number: None,
                created_at: chrono::DateTime::from_timestamp(0, 0).unwrap(),
            }],
            total: 1,
            params: ListingParams {
                q: Some("straße".to_string()),
                ..Default::default()
            },
        });
        assert!(view.visible_records().is_empty());

        let html = render_fallback_listing(&view);
        assert!(html.contains("STRASSE"));

        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates");
        let theme = ThemeEngine::new(&dir).unwrap();
        let html = theme.render(LISTING_TEMPLATE, &listing_context(&view)).unwrap();
        assert!(html.contains("STRASSE"));
    }

    #[test]
    fn sort_links_mark_active_column() {
        let links = sort_links(&view());
        assert_eq!(links.len(), 3);
        let active: Vec<_> = links.iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label, "Last Name");
        assert!(active[0].url.contains("order=desc"));
    }
}
