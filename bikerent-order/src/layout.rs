//! Desktop and mobile presentations of the booking widget.
//!
//! Both render the same [`OverviewSnapshot`]; neither holds state of its own.

use bikerent_calendar::DayCell;
use bikerent_catalog::PricingBreakdown;
use serde::Serialize;

use crate::models::{BookingConfirmation, ButtonState};
use crate::overview::OverviewSnapshot;

const RULE: &str = "----------------------------------";
const FALLBACK_BIKE_NAME: &str = "Electric Bike";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Desktop,
    Mobile,
}

impl LayoutKind {
    pub fn for_width(width: u32, mobile_breakpoint: u32) -> Self {
        if width < mobile_breakpoint {
            LayoutKind::Mobile
        } else {
            LayoutKind::Desktop
        }
    }
}

pub trait OverviewRenderer: Send + Sync {
    fn render(&self, snapshot: &OverviewSnapshot) -> String;
}

/// Inline panel next to the bike details
pub struct DesktopLayout;

/// Bottom bar plus a full-height booking sheet
pub struct MobileLayout;

static DESKTOP: DesktopLayout = DesktopLayout;
static MOBILE: MobileLayout = MobileLayout;

pub fn renderer_for(kind: LayoutKind) -> &'static dyn OverviewRenderer {
    match kind {
        LayoutKind::Desktop => &DESKTOP,
        LayoutKind::Mobile => &MOBILE,
    }
}

impl OverviewRenderer for DesktopLayout {
    fn render(&self, snapshot: &OverviewSnapshot) -> String {
        let mut lines = Vec::new();

        if let Some(confirmation) = &snapshot.confirmation {
            confirmation_lines(&mut lines, confirmation);
            lines.push("[ Go to Home ]".to_string());
            return lines.join("\n");
        }

        lines.push("Select Booking Dates".to_string());
        calendar_lines(&mut lines, snapshot);
        lines.push(String::new());
        overview_lines(&mut lines, &snapshot.pricing);
        footer_lines(&mut lines, snapshot);
        lines.join("\n")
    }
}

impl OverviewRenderer for MobileLayout {
    fn render(&self, snapshot: &OverviewSnapshot) -> String {
        let mut lines = Vec::new();

        if snapshot.mobile_sheet_open {
            lines.push("<- Booking".to_string());
            lines.push(format!(
                "{} (€{}/day)",
                snapshot.bike_name.as_deref().unwrap_or(FALLBACK_BIKE_NAME),
                snapshot.rate_by_day
            ));
            if let Some(image) = &snapshot.bike_image {
                lines.push(format!("  image: {}", image));
            }
            lines.push(String::new());
            lines.push("Select Dates".to_string());
            lines.push(format!(
                "[ {} ]",
                snapshot
                    .range_text
                    .as_deref()
                    .unwrap_or(bikerent_calendar::picker::INPUT_PLACEHOLDER)
            ));
            if snapshot.date_drawer_open {
                calendar_lines(&mut lines, snapshot);
                lines.push(button(&ButtonState {
                    label: "Select",
                    enabled: snapshot.can_confirm_dates,
                }));
            }
            lines.push(String::new());
            overview_lines(&mut lines, &snapshot.pricing);
            footer_lines(&mut lines, snapshot);
            lines.push(String::new());
        }

        lines.push(RULE.to_string());
        lines.push(format!("From €{}/day", snapshot.rate_by_day));
        lines.push(format!(
            "€{:.2} total    [ Rent a bike ]",
            snapshot.pricing.total
        ));

        if let Some(confirmation) = &snapshot.confirmation {
            lines.push(String::new());
            lines.push(RULE.to_string());
            confirmation_lines(&mut lines, confirmation);
            lines.push("[ Go to Home ]".to_string());
        }
        lines.join("\n")
    }
}

fn cell_token(cell: &DayCell) -> String {
    if cell.is_start || cell.is_end {
        format!("[{:>2}]", cell.label)
    } else if cell.in_range {
        format!("*{:>2}*", cell.label)
    } else if cell.is_disabled {
        format!("({:>2})", cell.label)
    } else if cell.is_today {
        format!("{{{:>2}}}", cell.label)
    } else {
        format!(" {:>2} ", cell.label)
    }
}

fn calendar_lines(lines: &mut Vec<String>, snapshot: &OverviewSnapshot) {
    lines.push(format!("  <  {:^20}  >", snapshot.month_label));
    lines.push(
        snapshot
            .weekdays
            .iter()
            .map(|day| format!("{:<4}", day))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );
    for week in snapshot.cells.chunks(7) {
        lines.push(week.iter().map(cell_token).collect::<String>().trim_end().to_string());
    }
    if !snapshot.range.is_empty() {
        lines.push("[ Clear Selection ]".to_string());
    }
}

fn price_row(label: &str, amount: f64) -> String {
    format!("{:<20}{:>12.2} €", label, amount)
}

fn overview_lines(lines: &mut Vec<String>, pricing: &PricingBreakdown) {
    lines.push("Booking Overview".to_string());
    lines.push(RULE.to_string());
    lines.push(price_row("Subtotal", pricing.subtotal));
    lines.push(price_row("Service Fee", pricing.service_fee));
    lines.push(price_row("Total", pricing.total));
}

fn button(state: &ButtonState) -> String {
    if state.enabled {
        format!("[ {} ]", state.label)
    } else {
        format!("( {} )", state.label)
    }
}

fn footer_lines(lines: &mut Vec<String>, snapshot: &OverviewSnapshot) {
    if let Some(error) = &snapshot.booking_error {
        lines.push(format!("! {}", error));
    }
    lines.push(button(&snapshot.button));
}

fn confirmation_lines(lines: &mut Vec<String>, confirmation: &BookingConfirmation) {
    lines.push("Thank You!".to_string());
    lines.push("Your bike has been successfully booked.".to_string());
    if let Some(bike) = &confirmation.bike {
        lines.push(bike.name.clone());
        if let Some(kind) = &bike.bike_type {
            lines.push(kind.clone());
        }
    }
    lines.push("Booking Summary".to_string());
    lines.push(format!("{:<16}€{:.2}", "Rent Amount:", confirmation.details.rent_amount));
    lines.push(format!("{:<16}€{:.2}", "Service Fee:", confirmation.details.fee));
    lines.push(format!("{:<16}€{:.2}", "Total:", confirmation.details.total_amount));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overview::BookingOverview;
    use bikerent_catalog::PricingEngine;
    use bikerent_shared::models::Bike;
    use chrono::NaiveDate;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn widget() -> BookingOverview {
        let bike = Bike::new(7, "Cannondale", 20.0);
        BookingOverview::for_bike(bike, PricingEngine::default(), june(1))
    }

    fn selected() -> BookingOverview {
        let mut widget = widget();
        widget.handle_date_click(june(1), june(1));
        widget.handle_date_click(june(3), june(1));
        widget
    }

    #[test]
    fn test_breakpoint() {
        assert_eq!(LayoutKind::for_width(1199, 1200), LayoutKind::Mobile);
        assert_eq!(LayoutKind::for_width(1200, 1200), LayoutKind::Desktop);
    }

    #[test]
    fn test_desktop_panel() {
        let text = renderer_for(LayoutKind::Desktop).render(&selected().snapshot(june(1)));

        assert!(text.contains("Select Booking Dates"));
        assert!(text.contains("June 2024"));
        assert!(text.contains("Sun Mon Tue Wed Thu Fri Sat"));
        assert!(text.contains("[ 1]"));
        assert!(text.contains("* 2*"));
        assert!(text.contains("[ 3]"));
        assert!(text.contains(&price_row("Subtotal", 60.0)));
        assert!(text.contains(&price_row("Service Fee", 6.0)));
        assert!(text.contains(&price_row("Total", 66.0)));
        assert!(text.contains("[ Add to booking ]"));
        assert!(text.contains("[ Clear Selection ]"));
    }

    #[test]
    fn test_mobile_bar_and_sheet() {
        let mut widget = selected().with_viewport(700, 1200);

        let closed = MobileLayout.render(&widget.snapshot(june(1)));
        assert!(closed.contains("From €20/day"));
        assert!(closed.contains("€66.00 total"));
        assert!(!closed.contains("Booking Overview"));

        widget.open_mobile_sheet();
        let open = MobileLayout.render(&widget.snapshot(june(1)));
        assert!(open.contains("Cannondale (€20/day)"));
        assert!(open.contains("[ From Jun 1, 2024 to Jun 3, 2024 ]"));
        assert!(open.contains("Booking Overview"));
    }

    #[test]
    fn test_same_snapshot_both_layouts() {
        let snapshot = selected().snapshot(june(1));
        let desktop = DesktopLayout.render(&snapshot);
        let mobile = MobileLayout.render(&snapshot);

        assert_ne!(desktop, mobile);
        assert!(desktop.contains("66.00 €"));
        assert!(mobile.contains("€66.00 total"));
    }

    #[test]
    fn test_disabled_button_is_parenthesised() {
        let text = DesktopLayout.render(&widget().snapshot(june(1)));
        assert!(text.contains("( Select dates to continue )"));
    }

    #[test]
    fn test_clear_button_needs_a_selection() {
        let mut widget = widget();
        assert!(!DesktopLayout.render(&widget.snapshot(june(1))).contains("Clear Selection"));

        widget.handle_date_click(june(5), june(1));
        assert!(DesktopLayout.render(&widget.snapshot(june(1))).contains("[ Clear Selection ]"));

        widget.clear_dates();
        assert!(!DesktopLayout.render(&widget.snapshot(june(1))).contains("Clear Selection"));
    }
}
