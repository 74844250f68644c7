//! Input forms for the front-desk commands.
//!
//! A form collects raw text, then turns it into a typed [`Command`]. Parse
//! failures keep the form open with the cursor on the offending field.

use chrono::{Days, NaiveDate};
use frontdesk_core::{models::validate_phone, AcType, ComfortTier, GuestDetails};

const MAX_FIELD_LEN: usize = 64;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Single-line editable text with a cursor counted in characters.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.value
            .char_indices()
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, self.len() as isize) as usize;
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    pub fn insert(&mut self, ch: char) {
        if ch.is_control() || self.len() >= MAX_FIELD_LEN {
            return;
        }
        let offset = self.byte_offset(self.cursor);
        self.value.insert(offset, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.value.remove(offset);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let offset = self.byte_offset(self.cursor);
            self.value.remove(offset);
        }
    }
}

/// Labelled input inside a form.
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub input: TextInput,
}

impl FormField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            input: TextInput::default(),
        }
    }

    fn prefilled(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            input: TextInput::with_value(value),
        }
    }
}

/// Which command a form collects arguments for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    AddRoom,
    SearchRoom,
    CheckIn,
    CheckOut,
    SearchGuest,
}

impl FormKind {
    pub fn title(self) -> &'static str {
        match self {
            FormKind::AddRoom => "Add Room",
            FormKind::SearchRoom => "Search Room",
            FormKind::CheckIn => "Check-in",
            FormKind::CheckOut => "Check-out",
            FormKind::SearchGuest => "Search Customer",
        }
    }
}

/// Typed arguments for one front-desk operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddRoom {
        number: u32,
        tier: ComfortTier,
        ac: AcType,
        rent: u32,
    },
    SearchRoom(u32),
    CheckIn {
        room_number: u32,
        details: GuestDetails,
    },
    CheckOut(u32),
    SearchGuest(String),
}

/// A modal form: fields, focus and the last validation error.
#[derive(Debug, Clone)]
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
}

impl Form {
    fn new(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn add_room() -> Self {
        Self::new(
            FormKind::AddRoom,
            vec![
                FormField::new("Room Number"),
                FormField::new("Room Type (S for Standard / L for Luxury)"),
                FormField::new("AC Type (A for AC / N for Non-AC)"),
                FormField::new("Rent per Day"),
            ],
        )
    }

    pub fn search_room() -> Self {
        Self::new(FormKind::SearchRoom, vec![FormField::new("Room Number")])
    }

    /// Check-in form with dates prefilled for a one-night stay from `today`.
    pub fn check_in(today: NaiveDate) -> Self {
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);
        Self::new(
            FormKind::CheckIn,
            vec![
                FormField::new("Room Number"),
                FormField::new("Customer Name"),
                FormField::new("Address"),
                FormField::new("Phone Number"),
                FormField::prefilled("From Date (YYYY-MM-DD)", today.format(DATE_FORMAT).to_string()),
                FormField::prefilled("To Date (YYYY-MM-DD)", tomorrow.format(DATE_FORMAT).to_string()),
                FormField::prefilled("Number of Days", "1"),
                FormField::prefilled("Advance Payment", "0"),
            ],
        )
    }

    pub fn check_out() -> Self {
        Self::new(FormKind::CheckOut, vec![FormField::new("Room Number")])
    }

    pub fn search_guest() -> Self {
        Self::new(FormKind::SearchGuest, vec![FormField::new("Customer Name")])
    }

    pub fn focused_mut(&mut self) -> Option<&mut TextInput> {
        self.fields.get_mut(self.focus).map(|field| &mut field.input)
    }

    pub fn move_focus(&mut self, delta: isize) {
        if self.fields.is_empty() {
            return;
        }
        let len = self.fields.len() as isize;
        self.focus = (self.focus as isize + delta).rem_euclid(len) as usize;
    }

    pub fn is_last_field(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    /// Parse the fields into a command.
    ///
    /// On failure the error is stored, focus jumps to the offending field and
    /// `None` is returned so the caller can prompt again.
    pub fn submit(&mut self) -> Option<Command> {
        match self.parse() {
            Ok(command) => {
                self.error = None;
                Some(command)
            }
            Err((index, message)) => {
                self.focus = index;
                self.error = Some(message);
                None
            }
        }
    }

    fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|field| field.input.value())
            .unwrap_or("")
    }

    fn parse(&self) -> Result<Command, (usize, String)> {
        match self.kind {
            FormKind::AddRoom => Ok(Command::AddRoom {
                number: parse_number(self.value(0), "room number").map_err(|e| (0, e))?,
                tier: self
                    .value(1)
                    .parse::<ComfortTier>()
                    .map_err(|e| (1, e.to_string()))?,
                ac: self
                    .value(2)
                    .parse::<AcType>()
                    .map_err(|e| (2, e.to_string()))?,
                rent: parse_number(self.value(3), "rent").map_err(|e| (3, e))?,
            }),
            FormKind::SearchRoom | FormKind::CheckOut => {
                let number = parse_number(self.value(0), "room number").map_err(|e| (0, e))?;
                if self.kind == FormKind::SearchRoom {
                    Ok(Command::SearchRoom(number))
                } else {
                    Ok(Command::CheckOut(number))
                }
            }
            FormKind::SearchGuest => Ok(Command::SearchGuest(self.value(0).to_string())),
            FormKind::CheckIn => {
                let room_number =
                    parse_number(self.value(0), "room number").map_err(|e| (0, e))?;
                let phone = self.value(3).trim().to_string();
                validate_phone(&phone).map_err(|e| (3, e.to_string()))?;
                let days = parse_number(self.value(6), "number of days").map_err(|e| (6, e))?;
                if days == 0 {
                    return Err((6, "number of days must be at least 1".to_string()));
                }
                let advance_paid = parse_amount(self.value(7)).map_err(|e| (7, e))?;
                Ok(Command::CheckIn {
                    room_number,
                    details: GuestDetails {
                        name: self.value(1).to_string(),
                        address: self.value(2).to_string(),
                        phone,
                        from_date: self.value(4).trim().to_string(),
                        to_date: self.value(5).trim().to_string(),
                        days,
                        advance_paid,
                    },
                })
            }
        }
    }
}

fn parse_number(input: &str, what: &str) -> Result<u32, String> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("{what} must be a whole number, got '{}'", input.trim()))
}

fn parse_amount(input: &str) -> Result<f64, String> {
    match input.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(format!(
            "advance payment must be a non-negative amount, got '{}'",
            input.trim()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn fill(form: &mut Form, values: &[&str]) {
        for (field, value) in form.fields.iter_mut().zip(values) {
            field.input = TextInput::with_value(*value);
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 28).expect("valid date")
    }

    #[test]
    fn text_input_edits_at_cursor() {
        let mut input = TextInput::with_value("Rao");
        input.move_home();
        input.insert('A');
        input.insert(' ');
        assert_eq!(input.value(), "A Rao");
        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "A Ra");
        input.move_cursor(-10);
        input.delete();
        assert_eq!(input.value(), " Ra");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn text_input_handles_multibyte_characters() {
        let mut input = TextInput::with_value("José");
        input.backspace();
        input.insert('é');
        assert_eq!(input.value(), "José");
        input.move_cursor(-1);
        input.insert('x');
        assert_eq!(input.value(), "Josxé");
    }

    #[test]
    fn add_room_parses_typed_arguments() {
        let mut form = Form::add_room();
        fill(&mut form, &["101", "S", "N", "1000"]);
        assert_eq!(
            form.submit(),
            Some(Command::AddRoom {
                number: 101,
                tier: ComfortTier::Standard,
                ac: AcType::NonAc,
                rent: 1000,
            })
        );
        assert!(form.error.is_none());
    }

    #[test_case(&["abc", "S", "N", "1000"], 0 ; "bad number")]
    #[test_case(&["101", "Q", "N", "1000"], 1 ; "bad tier")]
    #[test_case(&["101", "L", "X", "1000"], 2 ; "bad ac")]
    #[test_case(&["101", "L", "A", "-1"], 3 ; "negative rent")]
    fn add_room_reports_offending_field(values: &[&str], field: usize) {
        let mut form = Form::add_room();
        fill(&mut form, values);
        assert_eq!(form.submit(), None);
        assert_eq!(form.focus, field);
        assert!(form.error.is_some());
    }

    #[test]
    fn check_in_prefills_dates() {
        let form = Form::check_in(today());
        assert_eq!(form.fields[4].input.value(), "2024-02-28");
        assert_eq!(form.fields[5].input.value(), "2024-02-29");
    }

    #[test]
    fn check_in_reprompts_for_phone() {
        let mut form = Form::check_in(today());
        fill(
            &mut form,
            &["101", "Asha Rao", "4 Lake View", "12345", "2024-02-28", "2024-03-02", "3", "500"],
        );
        assert_eq!(form.submit(), None);
        assert_eq!(form.focus, 3);

        form.fields[3].input = TextInput::with_value("9999999999");
        match form.submit() {
            Some(Command::CheckIn {
                room_number,
                details,
            }) => {
                assert_eq!(room_number, 101);
                assert_eq!(details.name, "Asha Rao");
                assert_eq!(details.phone, "9999999999");
                assert_eq!(details.to_date, "2024-03-02");
                assert_eq!(details.days, 3);
                assert_eq!(details.advance_paid, 500.0);
            }
            other => panic!("expected check-in, got {other:?}"),
        }
    }

    #[test]
    fn check_in_requires_positive_days() {
        let mut form = Form::check_in(today());
        fill(&mut form, &["101", "Asha", "-", "9999999999", "", "", "0", "0"]);
        assert_eq!(form.submit(), None);
        assert_eq!(form.focus, 6);
    }

    #[test]
    fn guest_search_keeps_name_verbatim() {
        let mut form = Form::search_guest();
        fill(&mut form, &["Asha Rao"]);
        assert_eq!(
            form.submit(),
            Some(Command::SearchGuest("Asha Rao".to_string()))
        );
    }

    #[test]
    fn focus_wraps_around() {
        let mut form = Form::add_room();
        form.move_focus(-1);
        assert_eq!(form.focus, 3);
        assert!(form.is_last_field());
        form.move_focus(1);
        assert_eq!(form.focus, 0);
    }
}
