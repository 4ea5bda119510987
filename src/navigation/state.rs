use crate::mvi::StoreState;

/// Top-level sections of the navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Group,
    Course,
    Attendance,
    Payme,
}

impl Section {
    /// Highlight index used by the navigation bar.
    pub const fn index(self) -> i32 {
        match self {
            Self::Home => 0,
            Self::Group => 1,
            Self::Course => 2,
            Self::Attendance => 3,
            Self::Payme => 4,
        }
    }

    pub fn from_index(index: i32) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.index() == index)
    }

    pub fn all() -> &'static [Section] {
        &[
            Self::Home,
            Self::Group,
            Self::Course,
            Self::Attendance,
            Self::Payme,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Group => "group",
            Self::Course => "course",
            Self::Attendance => "attendance",
            Self::Payme => "payme",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavigationState {
    /// Highlighted section index. Starts at 0 (home).
    pub active: i32,
    /// Navigation requested by the last transition, not yet handed to the router.
    pub redirect: Option<String>,
}

impl StoreState for NavigationState {}

impl NavigationState {
    /// The highlighted section, if `active` names a known one.
    pub fn section(&self) -> Option<Section> {
        Section::from_index(self.active)
    }
}
