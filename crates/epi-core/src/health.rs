//! Epidemiological health states and the contact infectivity rule.
//!
//! Variants are declared in disease-progression order, so the derived `Ord`
//! reads as "further along the disease course".  The ordering carries no
//! numeric meaning beyond that.

/// An agent's current epidemiological state.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HealthState {
    /// Never infected; can acquire infection through contact.
    #[default]
    Susceptible,
    /// Infected but not yet shedding.
    Exposed,
    /// Shedding; every contact this agent makes carries infectivity.
    Infectious,
    /// Cleared the infection and immune.
    Recovered,
    /// Removed from the dynamics (e.g. deceased).
    Removed,
}

impl HealthState {
    /// All variants in progression order.  Handy for tallies and reports.
    pub const ALL: [HealthState; 5] = [
        HealthState::Susceptible,
        HealthState::Exposed,
        HealthState::Infectious,
        HealthState::Recovered,
        HealthState::Removed,
    ];

    #[inline]
    pub fn is_infectious(self) -> bool {
        matches!(self, HealthState::Infectious)
    }

    #[inline]
    pub fn is_susceptible(self) -> bool {
        matches!(self, HealthState::Susceptible)
    }

    /// Infectivity a contact with an agent in this state carries.
    ///
    /// Binary baseline: `1.0` for `Infectious`, `0.0` otherwise.
    #[inline]
    pub fn contact_infectivity(self) -> f32 {
        if self.is_infectious() { 1.0 } else { 0.0 }
    }

    /// Position in [`HealthState::ALL`].
    #[inline]
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Lower-case label for logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            HealthState::Susceptible => "susceptible",
            HealthState::Exposed     => "exposed",
            HealthState::Infectious  => "infectious",
            HealthState::Recovered   => "recovered",
            HealthState::Removed     => "removed",
        }
    }
}

impl std::fmt::Display for HealthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
