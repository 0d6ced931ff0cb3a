//! Calendar representation of a counter value.
//!
//! Only the shape is provided; converting seconds to and from calendar parts is left to the caller.

use core::{
    convert::TryFrom,
    fmt::{self, Debug},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

/// Error returned when converting a number outside 0..=6 into a [`DayOfWeek`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidDayOfWeek;

/// Error returned when converting a number outside 1..=12 into a [`Month`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidMonth;

/// Month/day/year hour:minute:second.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTimeParts {
    pub day_of_week: DayOfWeek,
    pub year: u16,
    pub month: Month,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Debug for DateTimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.day_of_week,
            self.year,
            self.month as u8,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = InvalidDayOfWeek;

    fn try_from(num: u8) -> Result<Self, Self::Error> {
        Ok(match num {
            0 => DayOfWeek::Sunday,
            1 => DayOfWeek::Monday,
            2 => DayOfWeek::Tuesday,
            3 => DayOfWeek::Wednesday,
            4 => DayOfWeek::Thursday,
            5 => DayOfWeek::Friday,
            6 => DayOfWeek::Saturday,
            _ => return Err(InvalidDayOfWeek),
        })
    }
}

impl TryFrom<u8> for Month {
    type Error = InvalidMonth;

    fn try_from(num: u8) -> Result<Self, Self::Error> {
        Ok(match num {
            1 => Month::January,
            2 => Month::February,
            3 => Month::March,
            4 => Month::April,
            5 => Month::May,
            6 => Month::June,
            7 => Month::July,
            8 => Month::August,
            9 => Month::September,
            10 => Month::October,
            11 => Month::November,
            12 => Month::December,
            _ => return Err(InvalidMonth),
        })
    }
}

impl fmt::Display for InvalidDayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("day of week out of range")
    }
}

impl fmt::Display for InvalidMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("month out of range")
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn month_from_number() {
        assert_eq!(Ok(Month::August), Month::try_from(8));
        assert_eq!(Err(InvalidMonth), Month::try_from(0));
        assert_eq!(Err(InvalidMonth), Month::try_from(13));
    }

    #[test]
    fn day_of_week_from_number() {
        assert_eq!(Ok(DayOfWeek::Sunday), DayOfWeek::try_from(0));
        assert_eq!(Ok(DayOfWeek::Saturday), DayOfWeek::try_from(6));
        assert_eq!(Err(InvalidDayOfWeek), DayOfWeek::try_from(7));
    }

    #[test]
    fn parts_debug() {
        let parts = DateTimeParts {
            day_of_week: DayOfWeek::Tuesday,
            year: 2017,
            month: Month::November,
            day: 21,
            hour: 20,
            minute: 40,
            second: 59,
        };

        assert_eq!("Tuesday 2017-11-21T20:40:59", format!("{:?}", parts));
    }
}
