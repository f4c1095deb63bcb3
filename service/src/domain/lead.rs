//! [`Lead`] definitions.

use std::sync::LazyLock;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, SquareFeet};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use regex::Regex;
use uuid::Uuid;

use super::{material, project::Flow, quote::Breakdown};

/// Prospective customer who requested a quote.
#[derive(Clone, Debug, PartialEq)]
pub struct Lead {
    /// ID of this [`Lead`].
    pub id: Id,

    /// [`Flow`] this [`Lead`] was captured in.
    pub flow: Flow,

    /// [`Contact`] details of this [`Lead`].
    pub contact: Contact,

    /// [`QuoteSnapshot`] this [`Lead`] has been shown, if any.
    pub quote: Option<QuoteSnapshot>,

    /// [`Appointment`] booked by this [`Lead`], if any.
    pub appointment: Option<Appointment>,

    /// [`DateTime`] when this [`Lead`] was captured.
    pub created_at: CreationDateTime,
}

/// ID of a [`Lead`].
#[derive(
    Clone, Copy, Debug, Default, Display, Eq, From, FromStr, Hash, Into, PartialEq,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Contact details of a [`Lead`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Contact {
    /// [`Name`] of the customer.
    pub name: Option<Name>,

    /// [`Email`] of the customer.
    pub email: Option<Email>,

    /// [`Phone`] of the customer.
    pub phone: Option<Phone>,

    /// [`Address`] of the property to be floored.
    pub address: Option<Address>,

    /// [`ZipCode`] of the property to be floored.
    pub zip_code: Option<ZipCode>,
}

impl Contact {
    /// Indicates whether the customer can be reached by this [`Contact`].
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }

    /// Overwrites the details of this [`Contact`] with the ones provided in
    /// the `other` one, keeping the details missing there.
    pub fn merge(&mut self, other: Self) {
        let Self {
            name,
            email,
            phone,
            address,
            zip_code,
        } = other;
        if name.is_some() {
            self.name = name;
        }
        if email.is_some() {
            self.email = email;
        }
        if phone.is_some() {
            self.phone = phone;
        }
        if address.is_some() {
            self.address = address;
        }
        if zip_code.is_some() {
            self.zip_code = zip_code;
        }
    }
}

/// Checks whether the given `text` is trimmed, not empty, and fits into 512
/// bytes.
fn is_short_text(text: &str) -> bool {
    text.trim() == text && !text.is_empty() && text.len() <= 512
}

/// Name of a [`Lead`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        is_short_text(&name).then_some(Self(name))
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `lead::Name`")
    }
}

/// Email address of a [`Lead`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Email(String);

impl Email {
    /// Creates a new [`Email`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        Self::check(&address).then_some(Self(address))
    }

    /// Checks whether the given `address` is a valid [`Email`].
    fn check(address: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Email`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex")
        });

        let address = address.as_ref();
        address.len() <= 512 && REGEX.is_match(address)
    }
}

impl FromStr for Email {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Email`")
    }
}

/// Phone number of a [`Lead`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Phone(String);

impl Phone {
    /// Minimal number of digits in a [`Phone`] number.
    pub const MIN_DIGITS: usize = 10;

    /// Creates a new [`Phone`] if the given `number` is valid.
    #[must_use]
    pub fn new(number: impl Into<String>) -> Option<Self> {
        let number = number.into();
        Self::check(&number).then_some(Self(number))
    }

    /// Checks whether the given `number` is a valid [`Phone`].
    ///
    /// Formatting characters are allowed, as long as there are enough digits.
    fn check(number: impl AsRef<str>) -> bool {
        let number = number.as_ref();
        is_short_text(number)
            && number.chars().filter(char::is_ascii_digit).count()
                >= Self::MIN_DIGITS
    }

    /// Returns the digits of this [`Phone`] number.
    #[must_use]
    pub fn digits(&self) -> String {
        self.0.chars().filter(char::is_ascii_digit).collect()
    }
}

impl FromStr for Phone {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Phone`")
    }
}

/// Address of a property to be floored.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Address(String);

impl Address {
    /// Creates a new [`Address`] if the given `address` is valid.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Option<Self> {
        let address = address.into();
        is_short_text(&address).then_some(Self(address))
    }
}

impl FromStr for Address {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Address`")
    }
}

/// ZIP code of a property to be floored.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct ZipCode(String);

impl ZipCode {
    /// Creates a new [`ZipCode`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        is_short_text(&code).then_some(Self(code))
    }
}

impl FromStr for ZipCode {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ZipCode`")
    }
}

/// Quote shown to a [`Lead`], frozen at the moment it was shown.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuoteSnapshot {
    /// ID of the quoted [`Material`], if any.
    ///
    /// [`Material`]: crate::domain::Material
    pub material: Option<material::Id>,

    /// Quoted floor area.
    pub area: SquareFeet,

    /// Quoted price [`Breakdown`].
    pub breakdown: Breakdown,
}

/// Consultation booked by a [`Lead`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Appointment {
    /// [`AppointmentKind`] of this [`Appointment`].
    pub kind: AppointmentKind,

    /// [`PreferredTime`] of this [`Appointment`], if any.
    pub preferred_time: Option<PreferredTime>,

    /// [`DateTime`] when this [`Appointment`] was booked.
    pub booked_at: BookingDateTime,
}

define_kind! {
    #[doc = "Kind of an [`Appointment`]."]
    enum AppointmentKind {
        #[doc = "In-home measurement and consultation."]
        InPerson = 1,

        #[doc = "Phone call."]
        Call = 2,

        #[doc = "Video call."]
        Video = 3,
    }
}

define_kind! {
    #[doc = "Time of day preferred for an [`Appointment`]."]
    enum PreferredTime {
        #[doc = "8 AM to 12 PM."]
        Morning = 1,

        #[doc = "12 PM to 5 PM."]
        Afternoon = 2,

        #[doc = "5 PM to 8 PM."]
        Evening = 3,

        #[doc = "Saturday or Sunday."]
        Weekend = 4,
    }
}

/// [`DateTime`] when a [`Lead`] was captured.
pub type CreationDateTime = DateTimeOf<(Lead, unit::Creation)>;

/// [`DateTime`] when an [`Appointment`] was booked.
pub type BookingDateTime = DateTimeOf<(Appointment, unit::Booking)>;

#[cfg(test)]
mod spec {
    use super::{Address, AppointmentKind, Contact, Email, Name, Phone};

    #[test]
    fn email_format() {
        assert!(Email::new("jane@example.com").is_some());
        assert!(Email::new("a.b+c@sub.domain.io").is_some());
        assert!(Email::new("jane@example").is_none());
        assert!(Email::new("jane example@x.com").is_none());
        assert!(Email::new("@example.com").is_none());
        assert!(Email::new("").is_none());
    }

    #[test]
    fn phone_requires_ten_digits() {
        assert!(Phone::new("(555) 123-4567").is_some());
        assert!(Phone::new("+1 555 123 4567").is_some());
        assert!(Phone::new("555-1234").is_none());
        assert!(Phone::new(" 5551234567").is_none());
        assert_eq!(
            Phone::new("(555) 123-4567").unwrap().digits(),
            "5551234567",
        );
    }

    #[test]
    fn short_texts() {
        assert!(Name::new("Jane Doe").is_some());
        assert!(Name::new("").is_none());
        assert!(Address::new("1 Main St ").is_none());
        assert!(Address::new("x".repeat(513)).is_none());
    }

    #[test]
    fn appointment_kind_names() {
        assert_eq!(AppointmentKind::InPerson.to_string(), "in_person");
        assert_eq!(
            "video".parse::<AppointmentKind>().ok(),
            Some(AppointmentKind::Video),
        );
    }

    #[test]
    fn contact_reachability_and_merge() {
        let mut contact = Contact {
            name: Name::new("Jane"),
            email: None,
            phone: None,
            address: None,
            zip_code: None,
        };
        assert!(!contact.is_reachable());

        contact.merge(Contact {
            phone: Phone::new("555-123-4567"),
            ..Contact::default()
        });
        assert!(contact.is_reachable());
        assert_eq!(contact.name, Name::new("Jane"));

        contact.merge(Contact {
            name: Name::new("Jane Doe"),
            ..Contact::default()
        });
        assert_eq!(contact.name, Name::new("Jane Doe"));
        assert_eq!(contact.phone, Phone::new("555-123-4567"));
    }
}
