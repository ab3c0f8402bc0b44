//! Morse Code Table and Keying Plan
//!
//! Characters are stored as packed codes: read from the least-significant
//! bit, a 1 is a dit and a 0 is a dah, and the highest set bit is a
//! sentinel that ends the character. `E` (one dit) is `0b11`, `A` (dit dah)
//! is `0b101`.
//!
//! [`KeyingPlan`] turns a message into the exact sequence of marks, gaps
//! and display updates that both the blocking [`MorseEngine`] and the
//! tick-driven [`BeaconSequencer`] execute.
//!
//! [`MorseEngine`]: super::keyer::MorseEngine
//! [`BeaconSequencer`]: super::beacon::BeaconSequencer

/// Packed codes for ASCII 32..=127, indexed by `(c & 0x7F) - 32`.
/// Untabulated characters hold the bare sentinel (no elements).
static MORSE_TABLE: [u8; 96] = [
    0b0000_0001, 0b0100_1010, 0b0110_1101, 0b0000_0001, 0b0000_0001, 0b0000_0001, 0b0011_1101, 0b0110_0001, // ' !"#$%&''
    0b0011_0010, 0b0101_0010, 0b0000_0001, 0b0011_0101, 0b0100_1100, 0b0101_1110, 0b0101_0101, 0b0011_0110, // ()*+,-./
    0b0010_0000, 0b0010_0001, 0b0010_0011, 0b0010_0111, 0b0010_1111, 0b0011_1111, 0b0011_1110, 0b0011_1100, // 01234567
    0b0011_1000, 0b0011_0000, 0b0111_1000, 0b0110_1010, 0b0000_0001, 0b0010_1110, 0b0000_0001, 0b0111_0011, // 89:;<=>?
    0b0110_1001, 0b0000_0101, 0b0001_1110, 0b0001_1010, 0b0000_1110, 0b0000_0011, 0b0001_1011, 0b0000_1100, // @ABCDEFG
    0b0001_1111, 0b0000_0111, 0b0001_0001, 0b0000_1010, 0b0001_1101, 0b0000_0100, 0b0000_0110, 0b0000_1000, // HIJKLMNO
    0b0001_1001, 0b0001_0100, 0b0000_1101, 0b0000_1111, 0b0000_0010, 0b0000_1011, 0b0001_0111, 0b0000_1001, // PQRSTUVW
    0b0001_0110, 0b0001_0010, 0b0001_1100, 0b0000_0001, 0b0000_0001, 0b0000_0001, 0b0000_0001, 0b0101_0011, // XYZ[\]^_
    0b0000_0001, 0b0000_0101, 0b0001_1110, 0b0001_1010, 0b0000_1110, 0b0000_0011, 0b0001_1011, 0b0000_1100, // `abcdefg
    0b0001_1111, 0b0000_0111, 0b0001_0001, 0b0000_1010, 0b0001_1101, 0b0000_0100, 0b0000_0110, 0b0000_1000, // hijklmno
    0b0001_1001, 0b0001_0100, 0b0000_1101, 0b0000_1111, 0b0000_0010, 0b0000_1011, 0b0001_0111, 0b0000_1001, // pqrstuvw
    0b0001_0110, 0b0001_0010, 0b0001_1100, 0b0000_0001, 0b0000_0001, 0b0000_0001, 0b0000_0001, 0b0000_0001, // xyz{|}~DEL
];

/// Keying element or gap, measured in Morse units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    /// Dit (1 unit)
    Dit,
    /// Dah (3 units)
    Dah,
    /// Inter-element gap (1 unit)
    ElementGap,
    /// Inter-character gap (3 units, 2 additional after element gap)
    CharGap,
    /// Inter-word gap (7 units, 4 additional after char gap)
    WordGap,
    /// Silence before the first character (1 unit)
    LeadIn,
}

impl Element {
    /// Get duration in timing units
    #[must_use]
    pub const fn units(&self) -> u32 {
        match self {
            Self::Dit | Self::ElementGap | Self::LeadIn => 1,
            Self::Dah => 3,
            Self::CharGap => 2, // 2 additional after element gap
            Self::WordGap => 4, // 4 additional after char gap
        }
    }

    /// Check if this element produces a tone
    #[must_use]
    pub const fn is_tone(&self) -> bool {
        matches!(self, Self::Dit | Self::Dah)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Element {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Dit => defmt::write!(f, "."),
            Self::Dah => defmt::write!(f, "-"),
            Self::ElementGap => defmt::write!(f, "eg"),
            Self::CharGap => defmt::write!(f, "cg"),
            Self::WordGap => defmt::write!(f, "wg"),
            Self::LeadIn => defmt::write!(f, "lead"),
        }
    }
}

/// Packed, sentinel-terminated code for one character
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MorseCode(u8);

impl MorseCode {
    /// Code with no elements
    pub const EMPTY: Self = Self(1);

    /// Wrap a packed code
    #[must_use]
    pub const fn from_packed(bits: u8) -> Self {
        Self(bits)
    }

    /// Look up a character; anything outside the table is [`Self::EMPTY`]
    #[must_use]
    pub fn for_char(c: char) -> Self {
        if !c.is_ascii() {
            return Self::EMPTY;
        }
        match (c as u8 & 0x7F).checked_sub(32) {
            Some(index) => Self(MORSE_TABLE[index as usize]),
            None => Self::EMPTY,
        }
    }

    /// The packed value
    #[must_use]
    pub const fn packed(self) -> u8 {
        self.0
    }

    /// Number of dits and dahs
    #[must_use]
    pub const fn len(self) -> u32 {
        if self.0 <= 1 {
            0
        } else {
            7 - self.0.leading_zeros()
        }
    }

    /// True when the character keys nothing
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 <= 1
    }

    /// Iterate the elements, first element first
    #[must_use]
    pub const fn elements(self) -> Elements {
        Elements { bits: self.0 }
    }
}

/// Decoder over a packed code
#[derive(Clone, Copy, Debug)]
pub struct Elements {
    bits: u8,
}

impl Iterator for Elements {
    type Item = Element;

    fn next(&mut self) -> Option<Element> {
        if self.bits <= 1 {
            return None;
        }
        let element = if self.bits & 1 == 1 {
            Element::Dit
        } else {
            Element::Dah
        };
        self.bits >>= 1;
        Some(element)
    }
}

/// One step of a message transmission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyingStep<'a> {
    /// Key the signal (tones) or stay silent (gaps) for the element
    Key(Element),
    /// A character was consumed; the rest of the message follows
    Advance(&'a str),
    /// The character and its trailing gap are complete
    CharDone,
}

#[derive(Clone, Copy, Debug)]
enum PlanState {
    LeadIn,
    NextChar,
    Elements { code: Elements, gap_due: bool },
    Advance { space: bool },
    Trailing { space: bool },
    CharDone,
    Done,
}

/// Step-by-step schedule for keying a message
///
/// ```text
/// lead-in │ per char: (mark, element gap)* advance char-gap done
///         │ per space: advance word-gap done
/// ```
#[derive(Clone, Debug)]
pub struct KeyingPlan<'a> {
    text: &'a str,
    next: usize,
    state: PlanState,
}

impl<'a> KeyingPlan<'a> {
    /// Plan the transmission of `text`
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self {
            text,
            next: 0,
            state: PlanState::LeadIn,
        }
    }

    /// Total length of the plan in Morse units
    #[must_use]
    pub fn duration_units(self) -> u32 {
        self.filter_map(|step| match step {
            KeyingStep::Key(element) => Some(element.units()),
            _ => None,
        })
        .sum()
    }
}

impl<'a> Iterator for KeyingPlan<'a> {
    type Item = KeyingStep<'a>;

    fn next(&mut self) -> Option<KeyingStep<'a>> {
        loop {
            match self.state {
                PlanState::LeadIn => {
                    self.state = PlanState::NextChar;
                    return Some(KeyingStep::Key(Element::LeadIn));
                }
                PlanState::NextChar => {
                    let Some(c) = self.text[self.next..].chars().next() else {
                        self.state = PlanState::Done;
                        return None;
                    };
                    self.next += c.len_utf8();
                    self.state = if c == ' ' {
                        PlanState::Advance { space: true }
                    } else {
                        PlanState::Elements {
                            code: MorseCode::for_char(c).elements(),
                            gap_due: false,
                        }
                    };
                }
                PlanState::Elements { mut code, gap_due } => {
                    if gap_due {
                        self.state = PlanState::Elements {
                            code,
                            gap_due: false,
                        };
                        return Some(KeyingStep::Key(Element::ElementGap));
                    }
                    match code.next() {
                        Some(element) => {
                            self.state = PlanState::Elements {
                                code,
                                gap_due: true,
                            };
                            return Some(KeyingStep::Key(element));
                        }
                        None => self.state = PlanState::Advance { space: false },
                    }
                }
                PlanState::Advance { space } => {
                    self.state = PlanState::Trailing { space };
                    return Some(KeyingStep::Advance(&self.text[self.next..]));
                }
                PlanState::Trailing { space } => {
                    self.state = PlanState::CharDone;
                    let gap = if space {
                        Element::WordGap
                    } else {
                        Element::CharGap
                    };
                    return Some(KeyingStep::Key(gap));
                }
                PlanState::CharDone => {
                    self.state = PlanState::NextChar;
                    return Some(KeyingStep::CharDone);
                }
                PlanState::Done => return None,
            }
        }
    }
}
