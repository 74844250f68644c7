//! Ordered room inventory with linear lookups.

use tracing::{info, warn};

use crate::{
    error::{DeskError, Result},
    models::{AcType, ComfortTier, Room},
};

/// Result of listing vacant rooms.
///
/// An empty catalog is reported separately from a catalog whose rooms are all
/// taken so the caller can word its message accordingly.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability<'a> {
    /// The catalog holds no rooms at all.
    NoRooms,
    /// Every room is occupied.
    NoneAvailable,
    /// Vacant rooms in insertion order.
    Rooms(Vec<&'a Room>),
}

/// Row of the guest report.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub struct GuestRecord<'a> {
    pub room_number: u32,
    pub name: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub days: u32,
}

impl<'a> GuestRecord<'a> {
    /// Report row for `room`, or `None` when it is vacant.
    pub fn from_room(room: &'a Room) -> Option<Self> {
        room.occupant().map(|stay| Self {
            room_number: room.number(),
            name: &stay.name,
            address: &stay.address,
            phone: &stay.phone,
            days: stay.days,
        })
    }
}

/// Room counts shown in the status line.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogStats {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
}

/// All rooms known to the front desk, in insertion order.
///
/// Room numbers are not required to be unique; every lookup resolves to the
/// first room carrying the number.
#[derive(Debug, Clone, Default)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from rooms read back from disk.
    pub fn from_rooms(rooms: Vec<Room>) -> Self {
        Self { rooms }
    }

    /// All rooms in insertion order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms, duplicates included.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether no room has been added or loaded.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Append a vacant room and return it.
    pub fn add_room(&mut self, number: u32, tier: ComfortTier, ac: AcType, rent: u32) -> &Room {
        if self.rooms.iter().any(|room| room.number() == number) {
            warn!(room = number, "Duplicate room number added; lookups keep the first");
        }
        self.rooms.push(Room::new(number, tier, ac, rent));
        info!(room = number, tier = %tier, ac = %ac, rent, "Room added");
        &self.rooms[self.rooms.len() - 1]
    }

    /// First room carrying `number`.
    pub fn find_by_number(&self, number: u32) -> Result<&Room> {
        self.rooms
            .iter()
            .find(|room| room.number() == number)
            .ok_or(DeskError::RoomNotFound(number))
    }

    pub(crate) fn find_by_number_mut(&mut self, number: u32) -> Result<&mut Room> {
        self.rooms
            .iter_mut()
            .find(|room| room.number() == number)
            .ok_or(DeskError::RoomNotFound(number))
    }

    /// Vacant rooms in insertion order.
    pub fn list_available(&self) -> Availability<'_> {
        if self.rooms.is_empty() {
            return Availability::NoRooms;
        }
        let available: Vec<&Room> = self.rooms.iter().filter(|room| room.is_available()).collect();
        if available.is_empty() {
            Availability::NoneAvailable
        } else {
            Availability::Rooms(available)
        }
    }

    /// Occupied rooms whose guest name matches `name` exactly.
    pub fn find_by_guest_name(&self, name: &str) -> Vec<&Room> {
        self.rooms
            .iter()
            .filter(|room| {
                room.occupant()
                    .map(|stay| stay.name == name)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Every current guest in room order; empty when nobody is staying.
    pub fn guest_summary(&self) -> Vec<GuestRecord<'_>> {
        self.rooms.iter().filter_map(GuestRecord::from_room).collect()
    }

    /// Total, available and occupied room counts.
    pub fn stats(&self) -> CatalogStats {
        let occupied = self.rooms.iter().filter(|room| !room.is_available()).count();
        CatalogStats {
            total: self.rooms.len(),
            available: self.rooms.len() - occupied,
            occupied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GuestDetails, GuestStay, RoomStatus};

    fn stay(name: &str) -> GuestStay {
        GuestStay::new(
            1,
            GuestDetails {
                name: name.to_string(),
                address: "12 Harbour Road".to_string(),
                phone: "9999999999".to_string(),
                from_date: "2024-05-01".to_string(),
                to_date: "2024-05-04".to_string(),
                days: 3,
                advance_paid: 500.0,
            },
        )
    }

    #[test]
    fn added_rooms_are_available_with_given_fields() {
        let mut catalog = RoomCatalog::new();
        let room = catalog.add_room(101, ComfortTier::Standard, AcType::NonAc, 1000);
        assert_eq!(room.number(), 101);
        assert_eq!(room.tier(), ComfortTier::Standard);
        assert_eq!(room.ac(), AcType::NonAc);
        assert_eq!(room.rent(), 1000);
        assert_eq!(room.status(), RoomStatus::Available);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn empty_catalog_finds_nothing() {
        let catalog = RoomCatalog::new();
        for number in [0, 1, 101, u32::MAX] {
            assert_eq!(
                catalog.find_by_number(number),
                Err(DeskError::RoomNotFound(number))
            );
        }
    }

    #[test]
    fn duplicate_numbers_resolve_to_first_room() {
        let mut catalog = RoomCatalog::new();
        catalog.add_room(101, ComfortTier::Standard, AcType::NonAc, 1000);
        catalog.add_room(101, ComfortTier::Luxury, AcType::Ac, 4000);
        assert_eq!(catalog.len(), 2);
        let found = catalog.find_by_number(101).expect("room 101");
        assert_eq!(found.tier(), ComfortTier::Standard);
        assert_eq!(found.rent(), 1000);
    }

    #[test]
    fn availability_distinguishes_empty_from_full() {
        let mut catalog = RoomCatalog::new();
        assert_eq!(catalog.list_available(), Availability::NoRooms);

        catalog.add_room(101, ComfortTier::Standard, AcType::NonAc, 1000);
        catalog.add_room(102, ComfortTier::Luxury, AcType::Ac, 3000);
        catalog.add_room(103, ComfortTier::Standard, AcType::Ac, 1500);

        match catalog.list_available() {
            Availability::Rooms(rooms) => {
                let numbers: Vec<u32> = rooms.iter().map(|room| room.number()).collect();
                assert_eq!(numbers, vec![101, 102, 103]);
            }
            other => panic!("expected rooms, got {other:?}"),
        }

        catalog.rooms[1].occupy(stay("Asha"));
        match catalog.list_available() {
            Availability::Rooms(rooms) => {
                let numbers: Vec<u32> = rooms.iter().map(|room| room.number()).collect();
                assert_eq!(numbers, vec![101, 103]);
            }
            other => panic!("expected rooms, got {other:?}"),
        }

        catalog.rooms[0].occupy(stay("Ben"));
        catalog.rooms[2].occupy(stay("Cleo"));
        assert_eq!(catalog.list_available(), Availability::NoneAvailable);
    }

    #[test]
    fn guest_name_search_is_exact_and_case_sensitive() {
        let mut catalog = RoomCatalog::new();
        catalog.add_room(101, ComfortTier::Standard, AcType::NonAc, 1000);
        catalog.add_room(102, ComfortTier::Luxury, AcType::Ac, 3000);
        catalog.add_room(103, ComfortTier::Standard, AcType::Ac, 1500);
        catalog.rooms[0].occupy(stay("Asha Rao"));
        catalog.rooms[2].occupy(stay("Asha Rao"));

        let found: Vec<u32> = catalog
            .find_by_guest_name("Asha Rao")
            .iter()
            .map(|room| room.number())
            .collect();
        assert_eq!(found, vec![101, 103]);
        assert!(catalog.find_by_guest_name("asha rao").is_empty());
        assert!(catalog.find_by_guest_name("Asha").is_empty());
    }

    #[test]
    fn guest_summary_lists_occupied_rooms_only() {
        let mut catalog = RoomCatalog::new();
        assert!(catalog.guest_summary().is_empty());

        catalog.add_room(101, ComfortTier::Standard, AcType::NonAc, 1000);
        catalog.add_room(102, ComfortTier::Luxury, AcType::Ac, 3000);
        assert!(catalog.guest_summary().is_empty());

        catalog.rooms[1].occupy(stay("Ben"));
        let summary = catalog.guest_summary();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].room_number, 102);
        assert_eq!(summary[0].name, "Ben");
        assert_eq!(summary[0].address, "12 Harbour Road");
        assert_eq!(summary[0].phone, "9999999999");
        assert_eq!(summary[0].days, 3);

        assert_eq!(
            catalog.stats(),
            CatalogStats {
                total: 2,
                available: 1,
                occupied: 1
            }
        );
    }
}
