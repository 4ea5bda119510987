mod common;

use campus_admin::navigation::{NavigationStore, Section};
use campus_admin::router::Router;
use campus_admin::routes::RouteTable;

fn subscribed(initial: &str) -> (Router, NavigationStore) {
    let store = NavigationStore::new();
    let mut router = Router::new(RouteTable::builtin(), initial).unwrap();
    router.subscribe(store.clone()).unwrap();
    (router, store)
}

#[test]
fn known_paths_from_home() {
    let cases = [
        ("/attendance", 3),
        ("/course", 2),
        ("/group", 1),
        ("/payme", 4),
        ("/home", 0),
    ];
    for (path, expected) in cases {
        let (mut router, store) = subscribed("/home");
        assert_eq!(store.active(), 0);
        router.push(path).unwrap();
        assert_eq!(store.active(), expected, "path {path}");
    }
}

#[test]
fn unmatched_paths_keep_previous_highlight() {
    let (mut router, store) = subscribed("/course");
    assert_eq!(store.active(), 2);

    for path in ["/group/12", "/users", "/teacher", "/unknown", "/payme/extra"] {
        router.push(path).unwrap();
        assert_eq!(store.active(), 2, "path {path}");
    }
}

#[test]
fn root_redirects_to_home() {
    let (router, store) = subscribed("/");
    assert_eq!(router.current_path(), "/home");
    assert_eq!(store.active(), 0);
    assert_eq!(store.section(), Some(Section::Home));
}

#[test]
fn root_redirect_restores_home_highlight() {
    let (mut router, store) = subscribed("/payme");
    assert_eq!(store.active(), 4);

    router.push("/").unwrap();
    assert_eq!(router.current_path(), "/home");
    assert_eq!(store.active(), 0);
}

#[test]
fn initial_path_is_applied_at_subscription() {
    let (_, store) = subscribed("/attendance");
    assert_eq!(store.section(), Some(Section::Attendance));
}

#[test]
fn add_active_is_overwritten_by_next_known_path() {
    let (mut router, store) = subscribed("/home");
    store.add_active(7);
    assert_eq!(store.active(), 7);

    router.push("/users").unwrap();
    assert_eq!(store.active(), 7);

    router.push("/group").unwrap();
    assert_eq!(store.active(), 1);
}
