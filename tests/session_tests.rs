//! Tests for the menu session transition function
//!
//! The dispatch is a pure function of the selection string, so it can be
//! verified without a console, a device, or a datastore.

use droidflash::session::{MenuAction, Session};

#[test]
fn test_numbered_selections() {
    assert_eq!(Session::handle_selection("1"), MenuAction::DetectDevice);
    assert_eq!(Session::handle_selection("2"), MenuAction::ProvisionFirmware);
    assert_eq!(Session::handle_selection("3"), MenuAction::FlashDirectory);
    assert_eq!(Session::handle_selection("4"), MenuAction::ShowLog);
    assert_eq!(Session::handle_selection("5"), MenuAction::Quit);
}

#[test]
fn test_quit_aliases() {
    assert_eq!(Session::handle_selection("q"), MenuAction::Quit);
    assert_eq!(Session::handle_selection("quit"), MenuAction::Quit);
    assert_eq!(Session::handle_selection("exit"), MenuAction::Quit);
}

#[test]
fn test_selection_is_trimmed() {
    assert_eq!(Session::handle_selection(" 1 \n"), MenuAction::DetectDevice);
    assert_eq!(Session::handle_selection("\t5\n"), MenuAction::Quit);
}

#[test]
fn test_unknown_selections_are_invalid() {
    assert_eq!(Session::handle_selection(""), MenuAction::Invalid);
    assert_eq!(Session::handle_selection("0"), MenuAction::Invalid);
    assert_eq!(Session::handle_selection("6"), MenuAction::Invalid);
    assert_eq!(Session::handle_selection("flash"), MenuAction::Invalid);
    assert_eq!(Session::handle_selection("11"), MenuAction::Invalid);
}
