use crate::mvi::Reducer;
use crate::navigation::intent::NavigationIntent;
use crate::navigation::state::{NavigationState, Section};

/// Landing path for the bare root.
pub const HOME_PATH: &str = "/home";

/// What a known path does to the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    Highlight(Section),
    Redirect(&'static str),
}

/// Evaluated in order; the first exact match wins.
const PATH_RULES: &[(&str, PathAction)] = &[
    ("/attendance", PathAction::Highlight(Section::Attendance)),
    ("/course", PathAction::Highlight(Section::Course)),
    ("/group", PathAction::Highlight(Section::Group)),
    ("/home", PathAction::Highlight(Section::Home)),
    ("/payme", PathAction::Highlight(Section::Payme)),
    ("/", PathAction::Redirect(HOME_PATH)),
];

/// Action for a path, or `None` when the path leaves the state untouched.
pub fn action_for(path: &str) -> Option<PathAction> {
    PATH_RULES
        .iter()
        .find(|(rule, _)| *rule == path)
        .map(|(_, action)| *action)
}

pub struct NavigationReducer;

impl Reducer for NavigationReducer {
    type State = NavigationState;
    type Intent = NavigationIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            NavigationIntent::SetActive(active) => NavigationState {
                active,
                redirect: None,
            },
            NavigationIntent::PathChanged(path) => match action_for(&path) {
                Some(PathAction::Highlight(section)) => NavigationState {
                    active: section.index(),
                    redirect: None,
                },
                // Highlight is left alone; it follows once the redirect lands.
                Some(PathAction::Redirect(target)) => NavigationState {
                    redirect: Some(target.to_string()),
                    ..state
                },
                None => NavigationState {
                    redirect: None,
                    ..state
                },
            },
        }
    }
}
