//! Text rendering of front-desk results.

use frontdesk_core::{
    Availability, CheckInReceipt, CheckOutStatement, GuestRecord, LoadReport, Room,
};

const SEPARATOR: &str = "------------------------------------";

/// Titled block of text shown in the result panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub lines: Vec<String>,
}

impl Report {
    fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
        }
    }
}

pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

fn room_lines(room: &Room) -> Vec<String> {
    vec![
        format!("Room Number: {}", room.number()),
        format!("AC Type: {}", room.ac()),
        format!("Comfort Type: {}", room.tier()),
        format!("Rent: {}", room.rent()),
        format!("Status: {}", room.status()),
        room.tier().description().to_string(),
    ]
}

pub fn room_details(room: &Room) -> Report {
    Report::new(format!("Room {}", room.number()), room_lines(room))
}

pub fn available_rooms(availability: &Availability<'_>) -> Report {
    let lines = match availability {
        Availability::NoRooms => vec!["No rooms have been added yet.".to_string()],
        Availability::NoneAvailable => vec!["No Available Rooms.".to_string()],
        Availability::Rooms(rooms) => {
            let mut lines = Vec::new();
            for (index, room) in rooms.iter().enumerate() {
                if index > 0 {
                    lines.push(String::new());
                }
                lines.extend(room_lines(room));
            }
            lines
        }
    };
    Report::new("Available Rooms", lines)
}

fn guest_lines(record: &GuestRecord<'_>) -> Vec<String> {
    vec![
        format!("Customer Name: {}", record.name),
        format!("Room Number: {}", record.room_number),
        format!("Address: {}", record.address),
        format!("Phone: {}", record.phone),
        format!("Stay (Days): {}", record.days),
    ]
}

pub fn guest_search(name: &str, rooms: &[&Room]) -> Report {
    let records: Vec<GuestRecord<'_>> = rooms
        .iter()
        .filter_map(|room| GuestRecord::from_room(room))
        .collect();
    let lines = if records.is_empty() {
        vec!["Customer not found!".to_string()]
    } else {
        separated(&records)
    };
    Report::new(format!("Customer: {name}"), lines)
}

pub fn guest_summary(records: &[GuestRecord<'_>]) -> Report {
    let lines = if records.is_empty() {
        vec!["No Guests in Hotel!".to_string()]
    } else {
        separated(records)
    };
    Report::new("Guest Summary", lines)
}

fn separated(records: &[GuestRecord<'_>]) -> Vec<String> {
    let mut lines = Vec::new();
    for record in records {
        lines.extend(guest_lines(record));
        lines.push(SEPARATOR.to_string());
    }
    lines
}

pub fn check_in_receipt(receipt: &CheckInReceipt) -> Report {
    let mut lines = vec![
        format!("Booking ID: {}", receipt.booking_id),
        format!("Room Number: {}", receipt.room_number),
    ];
    if receipt.discount_applied {
        lines.push(format!(
            "Discount Applied: 10%! (visit #{})",
            receipt.visits
        ));
    }
    lines.push(format!("Total Bill: {}", format_amount(receipt.bill)));
    lines.push(String::new());
    lines.push("Customer Checked-in Successfully!".to_string());
    Report::new("Check-in", lines)
}

pub fn check_out_statement(statement: &CheckOutStatement) -> Report {
    let mut lines = vec![
        format!("Customer Name: {}", statement.guest_name),
        format!("Room Number: {}", statement.room_number),
    ];
    if statement.discount_applied {
        lines.push("Discount Applied: 10%!".to_string());
    }
    lines.push(format!("Amount to Pay: {}", format_amount(statement.amount_due)));
    lines.push(format!("Advance Paid: {}", format_amount(statement.advance_paid)));
    lines.push(String::new());
    lines.push("Customer Checked-out Successfully!".to_string());
    Report::new("Checkout Details", lines)
}

/// One-line summary of a room file load for the status bar.
pub fn load_summary(report: &LoadReport) -> String {
    let mut summary = format!("Loaded {} rooms", report.rooms.len());
    if report.skipped_unknown_tier > 0 {
        summary.push_str(&format!(
            " • skipped {} with unknown type",
            report.skipped_unknown_tier
        ));
    }
    if report.coerced_vacant > 0 {
        summary.push_str(&format!(
            " • {} saved as occupied now available",
            report.coerced_vacant
        ));
    }
    if let Some(err) = &report.stopped_at {
        summary.push_str(&format!(" • stopped early: {err}"));
    }
    summary
}
