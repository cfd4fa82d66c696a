//! Menus, pickers and floating surfaces: everything that opens from a trigger
//! or above the page.

use super::RuleClassifier;
use crate::component_type::ComponentType;
use crate::evidence::{clause, Evidence, Predicate};

pub(crate) const TRIGGER_TERMS: &[&str] = &["trigger", "anchor", "activator"];
pub(crate) const CONTENT_TERMS: &[&str] = &["content", "panel", "body"];
pub(crate) const ITEM_TERMS: &[&str] = &["item", "option"];
const HEADER_TERMS: &[&str] = &["header", "title"];
const CLOSE_TERMS: &[&str] = &["close", "dismiss"];
/// Selection state names, not select controls.
const SELECTION_STATES: &[&str] = &["selected", "selection", "selectable"];

/// Trigger plus content children. The compound tier is worth more than both
/// single tiers together.
pub(crate) fn trigger_and_content(both: f64, single: f64) -> Vec<crate::evidence::Clause> {
    vec![
        clause(
            Predicate::AllOf(vec![
                Predicate::ChildNamed(TRIGGER_TERMS),
                Predicate::ChildNamed(CONTENT_TERMS),
            ]),
            both,
            "Has trigger and content children",
        ),
        clause(
            Predicate::ChildNamed(TRIGGER_TERMS),
            single,
            "Has a trigger child",
        ),
        clause(
            Predicate::ChildNamed(CONTENT_TERMS),
            single,
            "Has a content child",
        ),
    ]
}

fn header_and_content(both: f64, single: f64) -> Vec<crate::evidence::Clause> {
    vec![
        clause(
            Predicate::AllOf(vec![
                Predicate::ChildNamed(HEADER_TERMS),
                Predicate::ChildNamed(CONTENT_TERMS),
            ]),
            both,
            "Has header and content children",
        ),
        clause(
            Predicate::ChildNamed(HEADER_TERMS),
            single,
            "Has a header child",
        ),
        clause(
            Predicate::ChildNamed(CONTENT_TERMS),
            single,
            "Has a content child",
        ),
    ]
}

pub(crate) fn many_items() -> Predicate {
    Predicate::DescendantsNamedAtLeast {
        terms: ITEM_TERMS,
        min: 2,
    }
}

pub fn dropdown_menu() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::DropdownMenu,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["dropdown menu"]),
                    0.6,
                    "Name matches 'dropdown menu'",
                ),
                clause(
                    Predicate::NameAny(&["dropdown"]),
                    0.45,
                    "Name contains 'dropdown'",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["menu"],
                        except: &[
                            "menubar",
                            "navigation",
                            "navmenu",
                            "context menu",
                            "menu item",
                        ],
                    },
                    0.3,
                    "Name contains generic 'menu'",
                ),
            ])
            .first_of(trigger_and_content(0.25, 0.1))
            .add(many_items(), 0.1, "Contains two or more items")
            .damp(
                "select_without_menu",
                Predicate::NameAnyExcept {
                    terms: &["select", "combobox", "picker"],
                    except: &["menu", "selected", "selection", "selectable"],
                },
                0.4,
                "Name suggests a select, not a menu",
            ),
    )
}

pub fn context_menu() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::ContextMenu,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["context menu"]),
                    0.7,
                    "Name matches 'context menu'",
                ),
                clause(
                    Predicate::NameAny(&["right click"]),
                    0.5,
                    "Name mentions right click",
                ),
            ])
            .first_of(trigger_and_content(0.2, 0.1))
            .add(many_items(), 0.1, "Contains two or more items"),
    )
}

pub fn select() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Select,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["select", "combobox"],
                        except: SELECTION_STATES,
                    },
                    0.6,
                    "Name suggests a select",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["picker"],
                        except: &["date picker", "color picker", "time picker"],
                    },
                    0.3,
                    "Name contains 'picker'",
                ),
            ])
            .first_of(trigger_and_content(0.2, 0.1))
            .add(
                Predicate::ChildNamed(&["value", "placeholder", "selected"]),
                0.1,
                "Has a value child",
            )
            .add(
                Predicate::DescendantNamed(&["chevron", "caret", "arrow"]),
                0.1,
                "Has a chevron indicator",
            )
            .add(many_items(), 0.1, "Contains two or more items")
            .damp(
                "menu_in_select",
                Predicate::NameAny(&["menu"]),
                0.5,
                "Name suggests a menu",
            ),
    )
}

pub fn popover() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Popover,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["popover"]),
                    0.65,
                    "Name contains 'popover'",
                ),
                clause(
                    Predicate::NameAny(&["popup", "flyout", "popout"]),
                    0.35,
                    "Name suggests a floating panel",
                ),
            ])
            .first_of(trigger_and_content(0.25, 0.1))
            .add(
                Predicate::ChildNamed(&["arrow"]),
                0.05,
                "Has an arrow child",
            )
            .damp(
                "popover_menu",
                Predicate::NameAny(&["menu"]),
                0.6,
                "Name suggests a menu",
            ),
    )
}

pub fn tooltip() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Tooltip,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["tooltip"]),
                    0.7,
                    "Name contains 'tooltip'",
                ),
                clause(
                    Predicate::NameAny(&["hint", "coachmark", "infotip"]),
                    0.35,
                    "Name suggests a hint bubble",
                ),
            ])
            .first_of(trigger_and_content(0.2, 0.1))
            .add(
                Predicate::DescendantNamed(&["arrow", "pointer"]),
                0.1,
                "Has an arrow",
            )
            .add(
                Predicate::AllOf(vec![
                    Predicate::ChildKind(crate::node::NodeKind::Text),
                    Predicate::MaxDimensionAtMost(320.0),
                ]),
                0.05,
                "Small text bubble",
            ),
    )
}

pub fn dialog() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Dialog,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["dialog", "modal"]),
                    0.6,
                    "Name suggests a dialog",
                ),
                clause(
                    Predicate::NameAny(&["lightbox"]),
                    0.3,
                    "Name contains 'lightbox'",
                ),
            ])
            .first_of(header_and_content(0.2, 0.1))
            .add(
                Predicate::DescendantNamed(CLOSE_TERMS),
                0.1,
                "Has a close control",
            )
            .add(
                Predicate::ChildNamed(&["overlay", "backdrop", "scrim"]),
                0.1,
                "Has an overlay child",
            )
            .add(
                Predicate::ChildNamed(&["footer", "actions"]),
                0.05,
                "Has a footer child",
            )
            .damp(
                "dialog_named_alert",
                Predicate::NameAny(&["alert", "confirm"]),
                0.5,
                "Name suggests an alert dialog",
            ),
    )
}

pub fn alert_dialog() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::AlertDialog,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["alert dialog", "confirm dialog", "confirmation dialog"]),
                    0.7,
                    "Name matches 'alert dialog'",
                ),
                clause(
                    Predicate::NameAny(&["confirm"]),
                    0.4,
                    "Name mentions confirmation",
                ),
            ])
            .first_of(vec![
                clause(
                    Predicate::AllOf(vec![
                        Predicate::DescendantNamed(&["action", "confirm", "continue"]),
                        Predicate::DescendantNamed(&["cancel"]),
                    ]),
                    0.25,
                    "Has action and cancel controls",
                ),
                clause(
                    Predicate::DescendantNamed(&["cancel"]),
                    0.1,
                    "Has a cancel control",
                ),
                clause(
                    Predicate::DescendantNamed(&["action", "confirm", "continue"]),
                    0.1,
                    "Has an action control",
                ),
            ])
            .add(
                Predicate::DescendantNamed(&["title", "description"]),
                0.05,
                "Has title or description",
            ),
    )
}

pub fn sheet() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Sheet,
        Evidence::new()
            .add(
                Predicate::NameAnyExcept {
                    terms: &["sheet", "drawer", "side panel", "slide over", "offcanvas"],
                    except: &["stylesheet", "spreadsheet", "worksheet", "datasheet"],
                },
                0.6,
                "Name suggests a sheet",
            )
            .first_of(header_and_content(0.2, 0.1))
            .add(
                Predicate::DescendantNamed(CLOSE_TERMS),
                0.05,
                "Has a close control",
            )
            .add(
                Predicate::ElongationAtLeast(2.5),
                0.05,
                "Edge-anchored proportions",
            ),
    )
}

pub fn classifiers() -> Vec<RuleClassifier> {
    vec![
        dropdown_menu(),
        context_menu(),
        select(),
        popover(),
        tooltip(),
        dialog(),
        alert_dialog(),
        sheet(),
    ]
}
