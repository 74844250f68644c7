//! Check-in and check-out over the room catalog.

use tracing::info;

use crate::{
    catalog::RoomCatalog,
    error::{DeskError, Result},
    ledger::LoyaltyLedger,
    models::{validate_phone, AcType, ComfortTier, GuestDetails, GuestStay, Room},
};

/// Billing summary returned by a successful check-in.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct CheckInReceipt {
    pub booking_id: u32,
    pub room_number: u32,
    /// Rent times days, before any discount.
    pub raw_bill: f64,
    /// Amount billed after the returning-guest discount.
    pub bill: f64,
    pub discount_applied: bool,
    /// Visits recorded for the phone number, this one included.
    pub visits: u32,
}

/// Settlement produced by a successful check-out.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutStatement {
    pub booking_id: u32,
    pub room_number: u32,
    pub guest_name: String,
    pub raw_bill: f64,
    pub bill: f64,
    pub discount_applied: bool,
    pub advance_paid: f64,
    /// `bill - advance_paid`; negative when the advance exceeded the bill.
    pub amount_due: f64,
}

/// Owner of the room catalog and the loyalty ledger.
///
/// Every front-desk command maps onto one method here and either returns a
/// typed payload or a [`DeskError`].
#[derive(Debug, Clone)]
pub struct FrontDesk {
    catalog: RoomCatalog,
    ledger: LoyaltyLedger,
    next_booking_id: u32,
}

impl Default for FrontDesk {
    fn default() -> Self {
        Self::new(RoomCatalog::new(), LoyaltyLedger::new())
    }
}

impl FrontDesk {
    /// Front desk over an existing catalog and ledger.
    pub fn new(catalog: RoomCatalog, ledger: LoyaltyLedger) -> Self {
        Self {
            catalog,
            ledger,
            next_booking_id: 1,
        }
    }

    /// Read access for lookups and reports.
    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    /// Visit counts recorded so far.
    pub fn ledger(&self) -> &LoyaltyLedger {
        &self.ledger
    }

    /// Append a vacant room to the catalog.
    pub fn add_room(&mut self, number: u32, tier: ComfortTier, ac: AcType, rent: u32) -> &Room {
        self.catalog.add_room(number, tier, ac, rent)
    }

    /// Attach a guest to a vacant room and bill the stay.
    ///
    /// The visit is counted before the bill is computed, so a phone number
    /// qualifies for the discount from its second stay onwards.
    pub fn check_in(&mut self, room_number: u32, details: GuestDetails) -> Result<CheckInReceipt> {
        let room = self.catalog.find_by_number_mut(room_number)?;
        if !room.is_available() {
            return Err(DeskError::RoomAlreadyOccupied(room_number));
        }
        validate_phone(&details.phone)?;

        let visits = self.ledger.record_visit(&details.phone);
        let raw_bill = room.raw_bill(details.days);
        let discount = self.ledger.discount_for(&details.phone, raw_bill);
        if discount.applied {
            info!(room = room_number, visits, "Returning guest discount applied");
        }

        let booking_id = self.next_booking_id;
        self.next_booking_id = self.next_booking_id.checked_add(1).unwrap_or(1);
        room.occupy(GuestStay::new(booking_id, details));
        info!(
            room = room_number,
            booking_id,
            bill = discount.amount,
            "Guest checked in"
        );

        Ok(CheckInReceipt {
            booking_id,
            room_number,
            raw_bill,
            bill: discount.amount,
            discount_applied: discount.applied,
            visits,
        })
    }

    /// Settle the stay in an occupied room and free it.
    ///
    /// The bill is recomputed with the guest's visit count as it stands now.
    /// The stay is removed from the room.
    pub fn check_out(&mut self, room_number: u32) -> Result<CheckOutStatement> {
        let room = self.catalog.find_by_number_mut(room_number)?;
        let Some(stay) = room.vacate() else {
            return Err(DeskError::RoomNotOccupied(room_number));
        };
        let raw_bill = room.raw_bill(stay.days);

        let discount = self.ledger.discount_for(&stay.phone, raw_bill);
        let amount_due = discount.amount - stay.advance_paid;
        info!(
            room = room_number,
            booking_id = stay.booking_id,
            amount_due,
            "Guest checked out"
        );

        Ok(CheckOutStatement {
            booking_id: stay.booking_id,
            room_number,
            guest_name: stay.name,
            raw_bill,
            bill: discount.amount,
            discount_applied: discount.applied,
            advance_paid: stay.advance_paid,
            amount_due,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoomStatus;

    const PHONE: &str = "9999999999";

    fn guest(name: &str, phone: &str, days: u32, advance_paid: f64) -> GuestDetails {
        GuestDetails {
            name: name.to_string(),
            address: "4 Lake View".to_string(),
            phone: phone.to_string(),
            from_date: "2024-06-01".to_string(),
            to_date: "2024-06-04".to_string(),
            days,
            advance_paid,
        }
    }

    fn desk_with_rooms() -> FrontDesk {
        let mut desk = FrontDesk::default();
        desk.add_room(101, ComfortTier::Standard, AcType::NonAc, 1000);
        desk.add_room(102, ComfortTier::Luxury, AcType::Ac, 500);
        desk
    }

    #[test]
    fn first_stay_is_billed_in_full() -> Result<()> {
        let mut desk = desk_with_rooms();
        let receipt = desk.check_in(101, guest("Asha", PHONE, 3, 1200.0))?;
        assert_eq!(receipt.bill, 3000.0);
        assert_eq!(receipt.raw_bill, 3000.0);
        assert!(!receipt.discount_applied);
        assert_eq!(receipt.visits, 1);
        assert_eq!(receipt.booking_id, 1);

        let room = desk.catalog().find_by_number(101)?;
        assert_eq!(room.status(), RoomStatus::Occupied);
        assert_eq!(room.occupant().map(|stay| stay.name.as_str()), Some("Asha"));

        let statement = desk.check_out(101)?;
        assert_eq!(statement.guest_name, "Asha");
        assert_eq!(statement.bill, 3000.0);
        assert_eq!(statement.advance_paid, 1200.0);
        assert_eq!(statement.amount_due, 1800.0);
        assert_eq!(
            desk.catalog().find_by_number(101)?.status(),
            RoomStatus::Available
        );
        Ok(())
    }

    #[test]
    fn second_stay_gets_discount() -> Result<()> {
        let mut desk = desk_with_rooms();
        desk.check_in(101, guest("Asha", PHONE, 3, 0.0))?;
        let receipt = desk.check_in(102, guest("Asha", PHONE, 2, 0.0))?;
        assert_eq!(receipt.raw_bill, 1000.0);
        assert_eq!(receipt.visits, 2);
        assert!(receipt.discount_applied);
        assert_eq!(receipt.bill, 900.0);
        assert_eq!(receipt.booking_id, 2);
        Ok(())
    }

    #[test]
    fn check_out_uses_current_visit_count() -> Result<()> {
        let mut desk = desk_with_rooms();
        desk.check_in(101, guest("Asha", PHONE, 3, 0.0))?;
        desk.check_in(102, guest("Asha", PHONE, 2, 0.0))?;

        let statement = desk.check_out(101)?;
        assert!(statement.discount_applied);
        assert_eq!(statement.raw_bill, 3000.0);
        assert_eq!(statement.bill, 2700.0);
        Ok(())
    }

    #[test]
    fn amount_due_may_be_negative() -> Result<()> {
        let mut desk = desk_with_rooms();
        desk.check_in(102, guest("Ben", "1234567890", 1, 800.0))?;
        let statement = desk.check_out(102)?;
        assert_eq!(statement.amount_due, -300.0);
        Ok(())
    }

    #[test]
    fn occupied_room_rejects_second_check_in() -> Result<()> {
        let mut desk = desk_with_rooms();
        desk.check_in(101, guest("Asha", PHONE, 3, 0.0))?;
        let err = desk
            .check_in(101, guest("Ben", "1234567890", 1, 0.0))
            .unwrap_err();
        assert_eq!(err, DeskError::RoomAlreadyOccupied(101));

        let room = desk.catalog().find_by_number(101)?;
        assert_eq!(room.occupant().map(|stay| stay.name.as_str()), Some("Asha"));
        assert_eq!(desk.ledger().visits("1234567890"), 0);
        Ok(())
    }

    #[test]
    fn vacant_room_rejects_check_out() {
        let mut desk = desk_with_rooms();
        assert_eq!(desk.check_out(101), Err(DeskError::RoomNotOccupied(101)));
    }

    #[test]
    fn unknown_room_is_reported() {
        let mut desk = desk_with_rooms();
        assert_eq!(
            desk.check_in(999, guest("Asha", PHONE, 1, 0.0)),
            Err(DeskError::RoomNotFound(999))
        );
        assert_eq!(desk.check_out(999), Err(DeskError::RoomNotFound(999)));
    }

    #[test]
    fn bad_phone_leaves_room_and_ledger_untouched() -> Result<()> {
        let mut desk = desk_with_rooms();
        let err = desk.check_in(101, guest("Asha", "12345", 2, 0.0)).unwrap_err();
        assert_eq!(err, DeskError::InvalidPhone("12345".to_string()));
        assert!(desk.catalog().find_by_number(101)?.is_available());
        assert_eq!(desk.ledger().visits("12345"), 0);
        Ok(())
    }

    #[test]
    fn check_out_clears_guest_data() -> Result<()> {
        let mut desk = desk_with_rooms();
        desk.check_in(101, guest("Asha", PHONE, 3, 0.0))?;
        desk.check_out(101)?;

        let room = desk.catalog().find_by_number(101)?;
        assert!(room.occupant().is_none());
        assert!(desk.catalog().find_by_guest_name("Asha").is_empty());
        assert!(desk.catalog().guest_summary().is_empty());
        assert_eq!(desk.ledger().visits(PHONE), 1);
        Ok(())
    }

    #[test]
    fn booking_ids_wrap_back_to_one() -> Result<()> {
        let mut desk = desk_with_rooms();
        desk.next_booking_id = u32::MAX;
        let last = desk.check_in(101, guest("Asha", PHONE, 1, 0.0))?;
        let next = desk.check_in(102, guest("Ben", "1234567890", 1, 0.0))?;
        assert_eq!(last.booking_id, u32::MAX);
        assert_eq!(next.booking_id, 1);
        Ok(())
    }

    #[test]
    fn injected_ledger_drives_discount() -> Result<()> {
        let mut ledger = LoyaltyLedger::new();
        ledger.record_visit(PHONE);
        let mut catalog = RoomCatalog::new();
        catalog.add_room(201, ComfortTier::Luxury, AcType::Ac, 2000);
        let mut desk = FrontDesk::new(catalog, ledger);

        let receipt = desk.check_in(201, guest("Cleo", PHONE, 1, 0.0))?;
        assert_eq!(receipt.visits, 2);
        assert!(receipt.discount_applied);
        assert_eq!(receipt.bill, 1800.0);
        Ok(())
    }
}
