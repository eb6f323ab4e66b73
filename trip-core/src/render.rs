//! Trip renderer
//!
//! Pure functions that turn results and failures into [`View`]s. Nothing here
//! performs I/O or mutates its input.

use crate::domain::trip::TripPlan;
use crate::view::{FailureKind, Link, Section, SectionBody, TripView, View};

pub const LOADING_MESSAGE: &str = "Loading your trip details...";
pub const PROCESSING_MESSAGE: &str = "Your trip plan is still being prepared...";
pub const RETRYING_MESSAGE: &str = "Error fetching result. Retrying...";
pub const TRANSPORT_MESSAGE: &str = "Failed to fetch response. Please try again later.";
pub const TIMEOUT_MESSAGE: &str =
    "Timed out waiting for your trip plan. Please submit your request again.";
pub const PDF_LINK_LABEL: &str = "Download PDF";

/// Render a finished plan, attaching the PDF link when there is one
pub fn render_trip(plan: &TripPlan, pdf_url: Option<&str>) -> TripView {
    let sections = vec![
        prose("Itinerary", &plan.itinerary),
        prose("Best Month to Visit", &plan.best_month_to_visit),
        prose("Weather", &plan.weather),
        prose("Budget Breakdown", &plan.budget_breakdown),
        list("Restaurants", &plan.restaurants),
        list("Hotels", &plan.hotels),
    ];

    let pdf_link = pdf_url
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(|href| Link {
            label: PDF_LINK_LABEL.to_string(),
            href: href.to_string(),
        });

    TripView { sections, pdf_link }
}

/// Render a free text answer with its line breaks
pub fn render_text(title: &str, text: &str) -> View {
    View::Text {
        title: title.to_string(),
        lines: line_breaks(text),
    }
}

pub fn render_failure(kind: FailureKind, message: impl Into<String>) -> View {
    View::Failure {
        kind,
        message: message.into(),
    }
}

pub fn render_unexpected_status(status: &str) -> View {
    render_failure(
        FailureKind::Protocol,
        format!("Unexpected status: {}", status),
    )
}

pub fn render_timeout() -> View {
    render_failure(FailureKind::Timeout, TIMEOUT_MESSAGE)
}

fn prose(title: &str, text: &str) -> Section {
    Section {
        title: title.to_string(),
        body: SectionBody::Prose {
            lines: line_breaks(text),
        },
    }
}

fn list(title: &str, items: &[String]) -> Section {
    Section {
        title: title.to_string(),
        body: SectionBody::List {
            items: items.to_vec(),
        },
    }
}

fn line_breaks(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trip::split_lines;

    fn sample_plan() -> TripPlan {
        TripPlan {
            itinerary: "Day 1: Alfama\n\nDay 2: Belem".to_string(),
            best_month_to_visit: "May".to_string(),
            weather: "Mild".to_string(),
            budget_breakdown: "Hotel: 600\nFood: 300".to_string(),
            restaurants: split_lines("A\nB\nC"),
            hotels: vec!["Hotel Lisboa".to_string()],
        }
    }

    #[test]
    fn test_restaurants_become_list_items_in_order() {
        let view = render_trip(&sample_plan(), None);
        let restaurants = view
            .sections
            .iter()
            .find(|s| s.title == "Restaurants")
            .unwrap();

        assert_eq!(
            restaurants.body,
            SectionBody::List {
                items: vec!["A".to_string(), "B".to_string(), "C".to_string()]
            }
        );
    }

    #[test]
    fn test_prose_keeps_line_breaks() {
        let view = render_trip(&sample_plan(), None);
        assert_eq!(
            view.sections[0].body,
            SectionBody::Prose {
                lines: vec![
                    "Day 1: Alfama".to_string(),
                    String::new(),
                    "Day 2: Belem".to_string()
                ]
            }
        );
    }

    #[test]
    fn test_pdf_link_attached_only_when_present() {
        let plan = sample_plan();

        let with_link = render_trip(&plan, Some("https://bucket/plan.pdf"));
        assert_eq!(
            with_link.pdf_link,
            Some(Link {
                label: PDF_LINK_LABEL.to_string(),
                href: "https://bucket/plan.pdf".to_string(),
            })
        );

        assert_eq!(render_trip(&plan, None).pdf_link, None);
        assert_eq!(render_trip(&plan, Some("  ")).pdf_link, None);
    }

    #[test]
    fn test_render_does_not_mutate_plan() {
        let plan = sample_plan();
        let before = plan.clone();
        let _ = render_trip(&plan, Some("https://bucket/plan.pdf"));
        assert_eq!(plan, before);
    }

    #[test]
    fn test_sections_in_display_order() {
        let titles: Vec<_> = render_trip(&sample_plan(), None)
            .sections
            .into_iter()
            .map(|s| s.title)
            .collect();

        assert_eq!(
            titles,
            vec![
                "Itinerary",
                "Best Month to Visit",
                "Weather",
                "Budget Breakdown",
                "Restaurants",
                "Hotels"
            ]
        );
    }

    #[test]
    fn test_render_text_and_failures() {
        assert_eq!(
            render_text("Trip Details", "line one\nline two"),
            View::Text {
                title: "Trip Details".to_string(),
                lines: vec!["line one".to_string(), "line two".to_string()],
            }
        );

        assert_eq!(
            render_unexpected_status("cancelled"),
            View::Failure {
                kind: FailureKind::Protocol,
                message: "Unexpected status: cancelled".to_string(),
            }
        );

        assert!(render_timeout().is_terminal());
    }

    #[test]
    fn test_view_serializes_with_view_tag() {
        let json = serde_json::to_value(render_timeout()).unwrap();
        assert_eq!(json["view"], "failure");
        assert_eq!(json["kind"], "timeout");
        assert_eq!(json["message"], TIMEOUT_MESSAGE);
    }
}
