use super::RuleClassifier;
use crate::component_type::ComponentType;
use crate::evidence::{clause, pattern, Evidence, Predicate};
use crate::node::LayoutMode;

pub fn menubar() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Menubar,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["menubar"]),
                    0.7,
                    "Name contains 'menubar'",
                ),
                clause(
                    Predicate::NameAny(&["app menu", "menu strip"]),
                    0.4,
                    "Name suggests an application menu row",
                ),
            ])
            .add(
                Predicate::DescendantsNamedAtLeast {
                    terms: &["menu"],
                    min: 2,
                },
                0.15,
                "Contains two or more menus",
            )
            .add(
                Predicate::DescendantsNamedAtLeast {
                    terms: &["trigger"],
                    min: 2,
                },
                0.1,
                "Contains two or more triggers",
            )
            .add(
                Predicate::Layout(LayoutMode::Horizontal),
                0.05,
                "Horizontal layout",
            ),
    )
}

pub fn navigation_menu() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::NavigationMenu,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["navigation menu", "nav menu"]),
                    0.7,
                    "Name matches 'navigation menu'",
                ),
                clause(
                    Predicate::NameAny(&["navigation", "navbar"]),
                    0.45,
                    "Name suggests navigation",
                ),
            ])
            .add(
                Predicate::DescendantsNamedAtLeast {
                    terms: &["link", "nav item"],
                    min: 2,
                },
                0.15,
                "Contains two or more links",
            )
            .add(
                Predicate::DescendantNamed(&["viewport", "indicator"]),
                0.05,
                "Has a viewport or indicator",
            )
            .add(
                Predicate::Layout(LayoutMode::Horizontal),
                0.05,
                "Horizontal layout",
            ),
    )
}

pub fn tabs() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Tabs,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["tabs", "tab list", "tab group", "tab bar"],
                        except: &["table"],
                    },
                    0.6,
                    "Name suggests tabs",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["tab"],
                        except: &["table", "tablet", "stable", "tabular"],
                    },
                    0.35,
                    "Name contains 'tab'",
                ),
            ])
            .first_of(vec![
                clause(
                    Predicate::AllOf(vec![
                        Predicate::ChildNamed(&["list", "header"]),
                        Predicate::ChildNamed(&["content", "panel"]),
                    ]),
                    0.25,
                    "Has tab list and panel children",
                ),
                clause(
                    Predicate::ChildNamed(&["list", "header"]),
                    0.1,
                    "Has a tab list child",
                ),
                clause(
                    Predicate::ChildNamed(&["content", "panel"]),
                    0.1,
                    "Has a panel child",
                ),
            ])
            .add(
                Predicate::DescendantsNamedAtLeast {
                    terms: &["tab", "trigger"],
                    min: 2,
                },
                0.1,
                "Contains two or more tab triggers",
            )
            .damp(
                "tabs_segmented",
                Predicate::NameAny(&["segmented", "toggle group"]),
                0.5,
                "Name suggests a toggle group",
            ),
    )
}

pub fn breadcrumb() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Breadcrumb,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["breadcrumb"]),
                    0.7,
                    "Name contains 'breadcrumb'",
                ),
                clause(
                    Predicate::NameAny(&["crumb", "trail"]),
                    0.35,
                    "Name suggests a trail",
                ),
            ])
            .add(
                Predicate::DescendantNamed(&["separator", "chevron", "slash", "divider"]),
                0.1,
                "Has separators between items",
            )
            .add(
                Predicate::DescendantsNamedAtLeast {
                    terms: &["item", "link", "page"],
                    min: 2,
                },
                0.1,
                "Contains two or more links",
            )
            .add(
                Predicate::Layout(LayoutMode::Horizontal),
                0.05,
                "Horizontal layout",
            ),
    )
}

pub fn pagination() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Pagination,
        Evidence::new()
            .add(
                Predicate::NameAny(&["pagination", "paginator", "pager"]),
                0.65,
                "Name suggests pagination",
            )
            .first_of(vec![
                clause(
                    Predicate::AllOf(vec![
                        Predicate::DescendantNamed(&["previous", "prev"]),
                        Predicate::DescendantNamed(&["next"]),
                    ]),
                    0.25,
                    "Has previous and next controls",
                ),
                clause(
                    Predicate::DescendantNamed(&["previous", "prev"]),
                    0.1,
                    "Has a previous control",
                ),
                clause(
                    Predicate::DescendantNamed(&["next"]),
                    0.1,
                    "Has a next control",
                ),
            ])
            .add(
                Predicate::DescendantsMatchingAtLeast {
                    pattern: pattern(r"^(page\s*)?\d+$"),
                    min: 2,
                },
                0.15,
                "Contains numbered pages",
            )
            .add(
                Predicate::DescendantNamed(&["ellipsis"]),
                0.05,
                "Has an ellipsis",
            )
            .add(
                Predicate::Layout(LayoutMode::Horizontal),
                0.05,
                "Horizontal layout",
            ),
    )
}

pub fn accordion() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Accordion,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["accordion"]),
                    0.7,
                    "Name contains 'accordion'",
                ),
                clause(
                    Predicate::NameAny(&["collapsible", "expandable", "disclosure", "faq"]),
                    0.4,
                    "Name suggests collapsible sections",
                ),
            ])
            .add(
                Predicate::DescendantsNamedAtLeast {
                    terms: &["item", "section"],
                    min: 2,
                },
                0.1,
                "Contains two or more sections",
            )
            .first_of(vec![
                clause(
                    Predicate::AllOf(vec![
                        Predicate::DescendantNamed(&["trigger", "header"]),
                        Predicate::DescendantNamed(&["content", "panel"]),
                    ]),
                    0.2,
                    "Sections have trigger and content",
                ),
                clause(
                    Predicate::DescendantNamed(&["trigger", "header"]),
                    0.1,
                    "Sections have a trigger",
                ),
                clause(
                    Predicate::DescendantNamed(&["content", "panel"]),
                    0.1,
                    "Sections have content",
                ),
            ])
            .add(
                Predicate::DescendantNamed(&["chevron", "caret", "plus"]),
                0.05,
                "Has expand indicators",
            )
            .add(
                Predicate::Layout(LayoutMode::Vertical),
                0.05,
                "Vertical layout",
            ),
    )
}

pub fn classifiers() -> Vec<RuleClassifier> {
    vec![
        menubar(),
        navigation_menu(),
        tabs(),
        breadcrumb(),
        pagination(),
        accordion(),
    ]
}
