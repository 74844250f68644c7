//! Shared domain models.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};

/// Required length of a guest phone number.
pub const PHONE_LEN: usize = 10;

/// Comfort classification of a room, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComfortTier {
    /// Regular room.
    Standard,
    /// Room with additional amenities.
    Luxury,
}

impl ComfortTier {
    /// Single-letter code used in the room file and at the prompt.
    pub fn code(self) -> char {
        match self {
            ComfortTier::Standard => 'S',
            ComfortTier::Luxury => 'L',
        }
    }

    /// Parse the single-letter tier code.
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            'S' => Ok(ComfortTier::Standard),
            'L' => Ok(ComfortTier::Luxury),
            other => Err(DeskError::InvalidRoomType(other.to_string())),
        }
    }

    /// Report line shown under the room details.
    pub fn description(self) -> &'static str {
        match self {
            ComfortTier::Standard => "This is a Standard Room.",
            ComfortTier::Luxury => "This is a Luxury Room with additional amenities!",
        }
    }
}

impl fmt::Display for ComfortTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComfortTier::Standard => f.write_str("Standard"),
            ComfortTier::Luxury => f.write_str("Luxury"),
        }
    }
}

impl FromStr for ComfortTier {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            _ => Err(DeskError::InvalidRoomType(trimmed.to_string())),
        }
    }
}

/// Air-conditioning fit of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcType {
    /// Air-conditioned.
    Ac,
    /// No air-conditioning.
    NonAc,
}

impl AcType {
    /// Single-letter code used in the room file and at the prompt.
    pub fn code(self) -> char {
        match self {
            AcType::Ac => 'A',
            AcType::NonAc => 'N',
        }
    }

    /// Parse the single-letter AC code.
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            'A' => Ok(AcType::Ac),
            'N' => Ok(AcType::NonAc),
            other => Err(DeskError::InvalidAcType(other.to_string())),
        }
    }
}

impl fmt::Display for AcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcType::Ac => f.write_str("AC"),
            AcType::NonAc => f.write_str("Non-AC"),
        }
    }
}

impl FromStr for AcType {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            _ => Err(DeskError::InvalidAcType(trimmed.to_string())),
        }
    }
}

/// Occupancy state of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    /// Free to check in.
    Available,
    /// Holds a guest stay.
    Occupied,
}

impl RoomStatus {
    /// Numeric flag used by the room file (`0` available, `1` occupied).
    pub fn flag(self) -> u8 {
        match self {
            RoomStatus::Available => 0,
            RoomStatus::Occupied => 1,
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Available => f.write_str("Available"),
            RoomStatus::Occupied => f.write_str("Reserved"),
        }
    }
}

/// Guest data captured at the check-in prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestDetails {
    /// Guest name as typed; searches match it exactly.
    pub name: String,
    /// Free-text postal address.
    pub address: String,
    /// Exactly ten characters; digits expected but not enforced.
    pub phone: String,
    /// `YYYY-MM-DD`, not validated.
    pub from_date: String,
    /// `YYYY-MM-DD`, not validated.
    pub to_date: String,
    /// Billed days, independent of the dates.
    pub days: u32,
    /// Amount paid up front, settled at check-out.
    pub advance_paid: f64,
}

/// Guest stay attached to an occupied room.
///
/// Mirrors [`GuestDetails`] plus the booking id assigned at check-in.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestStay {
    /// Sequential id handed out at check-in.
    pub booking_id: u32,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub from_date: String,
    pub to_date: String,
    pub days: u32,
    pub advance_paid: f64,
}

impl GuestStay {
    pub(crate) fn new(booking_id: u32, details: GuestDetails) -> Self {
        Self {
            booking_id,
            name: details.name,
            address: details.address,
            phone: details.phone,
            from_date: details.from_date,
            to_date: details.to_date,
            days: details.days,
            advance_paid: details.advance_paid,
        }
    }
}

/// One physical room.
///
/// The comfort tier is fixed at construction and the status is derived from
/// whether a stay is attached, so a room is occupied exactly when it holds
/// a guest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    number: u32,
    tier: ComfortTier,
    ac: AcType,
    rent: u32,
    occupant: Option<GuestStay>,
}

impl Room {
    /// Create a vacant room.
    pub fn new(number: u32, tier: ComfortTier, ac: AcType, rent: u32) -> Self {
        Self {
            number,
            tier,
            ac,
            rent,
            occupant: None,
        }
    }

    /// Room number; not guaranteed unique within a catalog.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Comfort tier set at construction.
    pub fn tier(&self) -> ComfortTier {
        self.tier
    }

    /// Air-conditioning fit.
    pub fn ac(&self) -> AcType {
        self.ac
    }

    /// Price per day.
    pub fn rent(&self) -> u32 {
        self.rent
    }

    /// Occupied exactly when a guest stay is attached.
    pub fn status(&self) -> RoomStatus {
        if self.occupant.is_some() {
            RoomStatus::Occupied
        } else {
            RoomStatus::Available
        }
    }

    /// Whether the room can take a check-in.
    pub fn is_available(&self) -> bool {
        self.occupant.is_none()
    }

    /// Current guest stay, if any.
    pub fn occupant(&self) -> Option<&GuestStay> {
        self.occupant.as_ref()
    }

    /// Undiscounted bill for `days` at this room's rent.
    pub fn raw_bill(&self, days: u32) -> f64 {
        f64::from(self.rent) * f64::from(days)
    }

    pub(crate) fn occupy(&mut self, stay: GuestStay) {
        self.occupant = Some(stay);
    }

    pub(crate) fn vacate(&mut self) -> Option<GuestStay> {
        self.occupant.take()
    }
}

/// Check the phone number length rule.
pub fn validate_phone(phone: &str) -> Result<()> {
    if phone.chars().count() == PHONE_LEN {
        Ok(())
    } else {
        Err(DeskError::InvalidPhone(phone.to_string()))
    }
}
