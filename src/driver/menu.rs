//! Menu options of the interactive planner

/// Code that leaves the menu
pub const EXIT_CODE: &str = "0";

/// A calculation picked from the menu by its code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    InterestRate,
    FutureValue,
    Payment,
    PresentValue,
    EffectiveRate,
    NominalRate,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::InterestRate,
        MenuChoice::FutureValue,
        MenuChoice::Payment,
        MenuChoice::PresentValue,
        MenuChoice::EffectiveRate,
        MenuChoice::NominalRate,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code.trim())
    }

    pub fn code(&self) -> &'static str {
        match self {
            MenuChoice::InterestRate => "1",
            MenuChoice::FutureValue => "2",
            MenuChoice::Payment => "3",
            MenuChoice::PresentValue => "4",
            MenuChoice::EffectiveRate => "5",
            MenuChoice::NominalRate => "6",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MenuChoice::InterestRate => "Calculate the interest rate of the investment.",
            MenuChoice::FutureValue => "Calculate the future value of the investment.",
            MenuChoice::Payment => "Calculate the constant periodic payment.",
            MenuChoice::PresentValue => "Calculate the initial capital required for the investment.",
            MenuChoice::EffectiveRate => "Convert a nominal rate to the effective annual rate.",
            MenuChoice::NominalRate => "Convert an effective rate to the nominal annual rate.",
        }
    }

    /// Full option listing shown at start-up
    pub fn listing() -> String {
        let mut text = String::from("Please select one of the options below:\n");
        text.push_str(&format!("{}: Exit the program.\n", EXIT_CODE));
        for choice in Self::ALL {
            text.push_str(&format!("{}: {}\n", choice.code(), choice.description()));
        }
        text
    }
}
