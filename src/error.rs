//! Error types for the planning engine.
//!
//! Structured errors with backtraces (when std is enabled) and helper methods
//! for inspecting what went wrong. Cleaning functions never produce these;
//! only parsing, pattern inference and the commit gates do.

use alloc::string::String;
use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for planning operations.
pub type Result<T> = core::result::Result<T, PlanError>;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

/// Field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    PhysicalAddress,
    RoomAddress,
    ChannelName,
    /// The device a zone is committed to
    Device,
}

impl Field {
    /// Human-readable field name used in messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::PhysicalAddress => "physical address",
            Field::RoomAddress => "room address",
            Field::ChannelName => "channel name",
            Field::Device => "device",
        }
    }
}

/// Validation error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ValidationErrorKind {
    MissingRequiredField,
    InvalidFormat,
}

/// Duplicate error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum DuplicateErrorKind {
    PhysicalAddress,
    RoomAddress,
}

/// Capacity error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum CapacityErrorKind {
    ZoneLimitReached { max: usize },
    AddressSpaceExhausted,
}

/// Pattern inference error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum PatternErrorKind {
    NoExamples,
    MixedMainGroups,
    ExampleOutOfRange { object: usize },
}

/// Addressing error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum AddressingErrorKind {
    InvalidPhysicalAddress,
    InvalidGroupAddress,
    InvalidRoomAddress,
    InvalidDatapointType,
    OutOfRange,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// Planning error types.
///
/// Returned by the commit gates, pattern inference and typed address parsing.
#[derive(Debug)]
pub enum PlanError {
    /// Missing or malformed input at save time
    Validation(ValidationError),
    /// Address already taken by another device or zone
    Duplicate(DuplicateError),
    /// No more room in the configured pattern or address space
    Capacity(CapacityError),
    /// Example addresses cannot be turned into a pattern
    Pattern(PatternError),
    /// Typed address could not be parsed or built
    Addressing(AddressingError),
}

// =============================================================================
// Structured Error Types
// =============================================================================

/// Validation error with optional backtrace
#[derive(Debug)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    field: Field,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, field: Field) -> Self {
        Self {
            kind,
            field,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Field that failed validation
    pub fn field(&self) -> Field {
        self.field
    }

    /// Check if a required field was left empty
    pub fn is_missing(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::MissingRequiredField)
    }

    /// Check if the field was present but malformed
    pub fn is_invalid_format(&self) -> bool {
        matches!(self.kind, ValidationErrorKind::InvalidFormat)
    }
}

/// Duplicate address error with optional backtrace
#[derive(Debug)]
pub struct DuplicateError {
    kind: DuplicateErrorKind,
    address: String,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl DuplicateError {
    pub(crate) fn new(kind: DuplicateErrorKind, address: &str) -> Self {
        Self {
            kind,
            address: String::from(address),
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// The address that is already in use
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Check if a physical address collided
    pub fn is_physical_address(&self) -> bool {
        matches!(self.kind, DuplicateErrorKind::PhysicalAddress)
    }

    /// Check if an HVAC room address collided
    pub fn is_room_address(&self) -> bool {
        matches!(self.kind, DuplicateErrorKind::RoomAddress)
    }
}

/// Capacity error with optional backtrace
#[derive(Debug)]
pub struct CapacityError {
    kind: CapacityErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl CapacityError {
    pub(crate) fn new(kind: CapacityErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Configured zone maximum, if this is a zone limit error
    pub fn zone_limit(&self) -> Option<usize> {
        match self.kind {
            CapacityErrorKind::ZoneLimitReached { max } => Some(max),
            CapacityErrorKind::AddressSpaceExhausted => None,
        }
    }

    /// Check if an expansion ran past the KNX group address ranges
    pub fn is_address_space_exhausted(&self) -> bool {
        matches!(self.kind, CapacityErrorKind::AddressSpaceExhausted)
    }
}

/// Pattern inference error with optional backtrace
#[derive(Debug)]
pub struct PatternError {
    kind: PatternErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl PatternError {
    pub(crate) fn new(kind: PatternErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the examples used more than one main group
    pub fn is_mixed_main_groups(&self) -> bool {
        matches!(self.kind, PatternErrorKind::MixedMainGroups)
    }

    /// Check if no examples were given
    pub fn is_empty(&self) -> bool {
        matches!(self.kind, PatternErrorKind::NoExamples)
    }

    /// Index of the offending example object, for range errors
    pub fn object(&self) -> Option<usize> {
        match self.kind {
            PatternErrorKind::ExampleOutOfRange { object } => Some(object),
            _ => None,
        }
    }
}

/// Addressing error with optional backtrace
#[derive(Debug)]
pub struct AddressingError {
    kind: AddressingErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl AddressingError {
    pub(crate) fn new(kind: AddressingErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if address is out of range
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, AddressingErrorKind::OutOfRange)
    }
}

// =============================================================================
// Convenience Constructors for PlanError
// =============================================================================

impl PlanError {
    // Validation errors
    pub(crate) fn missing(field: Field) -> Self {
        Self::Validation(ValidationError::new(ValidationErrorKind::MissingRequiredField, field))
    }

    pub(crate) fn invalid_format(field: Field) -> Self {
        Self::Validation(ValidationError::new(ValidationErrorKind::InvalidFormat, field))
    }

    // Duplicate errors
    pub(crate) fn duplicate_physical_address(address: &str) -> Self {
        Self::Duplicate(DuplicateError::new(DuplicateErrorKind::PhysicalAddress, address))
    }

    pub(crate) fn duplicate_room_address(address: &str) -> Self {
        Self::Duplicate(DuplicateError::new(DuplicateErrorKind::RoomAddress, address))
    }

    // Capacity errors
    pub(crate) fn zone_limit_reached(max: usize) -> Self {
        Self::Capacity(CapacityError::new(CapacityErrorKind::ZoneLimitReached { max }))
    }

    pub(crate) fn address_space_exhausted() -> Self {
        Self::Capacity(CapacityError::new(CapacityErrorKind::AddressSpaceExhausted))
    }

    // Pattern errors
    pub(crate) fn no_examples() -> Self {
        Self::Pattern(PatternError::new(PatternErrorKind::NoExamples))
    }

    pub(crate) fn mixed_main_groups() -> Self {
        Self::Pattern(PatternError::new(PatternErrorKind::MixedMainGroups))
    }

    pub(crate) fn example_out_of_range(object: usize) -> Self {
        Self::Pattern(PatternError::new(PatternErrorKind::ExampleOutOfRange { object }))
    }

    // Addressing errors
    pub(crate) fn invalid_physical_address() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidPhysicalAddress))
    }

    pub(crate) fn invalid_group_address() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidGroupAddress))
    }

    pub(crate) fn invalid_room_address() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidRoomAddress))
    }

    pub(crate) fn invalid_datapoint_type() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidDatapointType))
    }

    pub(crate) fn address_out_of_range() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::OutOfRange))
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Validation(e) => match e.kind {
                ValidationErrorKind::MissingRequiredField => {
                    write!(f, "{} is required", e.field.as_str())
                }
                ValidationErrorKind::InvalidFormat => {
                    write!(f, "{} has an invalid format", e.field.as_str())
                }
            },
            PlanError::Duplicate(e) => match e.kind {
                DuplicateErrorKind::PhysicalAddress => {
                    write!(f, "physical address {} already exists", e.address)
                }
                DuplicateErrorKind::RoomAddress => {
                    write!(f, "room address {} is already used by another zone", e.address)
                }
            },
            PlanError::Capacity(e) => match e.kind {
                CapacityErrorKind::ZoneLimitReached { max } => {
                    write!(f, "maximum number of zones ({max}) reached")
                }
                CapacityErrorKind::AddressSpaceExhausted => {
                    write!(f, "group address range exhausted")
                }
            },
            PlanError::Pattern(e) => match e.kind {
                PatternErrorKind::NoExamples => write!(f, "no example addresses given"),
                PatternErrorKind::MixedMainGroups => {
                    write!(f, "all example addresses must share one main group")
                }
                PatternErrorKind::ExampleOutOfRange { object } => {
                    write!(f, "example object {} is out of range", object + 1)
                }
            },
            PlanError::Addressing(e) => write!(f, "Addressing error: {:?}", e.kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlanError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PlanError::missing(Field::PhysicalAddress).to_string(),
            "physical address is required"
        );
        assert_eq!(
            PlanError::duplicate_physical_address("1.1.1").to_string(),
            "physical address 1.1.1 already exists"
        );
        assert_eq!(
            PlanError::zone_limit_reached(15).to_string(),
            "maximum number of zones (15) reached"
        );
        assert_eq!(
            PlanError::example_out_of_range(0).to_string(),
            "example object 1 is out of range"
        );
    }

    #[test]
    fn test_inspection_helpers() {
        let PlanError::Validation(e) = PlanError::invalid_format(Field::RoomAddress) else {
            panic!("expected validation error");
        };
        assert!(e.is_invalid_format());
        assert!(!e.is_missing());
        assert_eq!(e.field(), Field::RoomAddress);

        let PlanError::Capacity(e) = PlanError::zone_limit_reached(7) else {
            panic!("expected capacity error");
        };
        assert_eq!(e.zone_limit(), Some(7));
        assert!(!e.is_address_space_exhausted());
    }
}
