//! Controls that take user input.

use super::RuleClassifier;
use crate::component_type::ComponentType;
use crate::evidence::{clause, Evidence, Predicate};
use crate::node::{LayoutMode, NodeKind};

const FIELD_CONTROL_TERMS: &[&str] = &["input", "control", "select", "textarea", "text field"];

pub fn button() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Button,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["button", "btn", "cta"],
                        except: &["radio button", "button group"],
                    },
                    0.6,
                    "Name suggests a button",
                ),
                clause(
                    Predicate::NameAny(&["submit"]),
                    0.3,
                    "Name contains 'submit'",
                ),
            ])
            .add(
                Predicate::ChildKind(NodeKind::Text),
                0.1,
                "Has a text label",
            )
            .add(Predicate::ChildNamed(&["icon"]), 0.05, "Has an icon")
            .add(Predicate::HasCornerRadius, 0.05, "Rounded corners")
            .add(
                Predicate::Layout(LayoutMode::Horizontal),
                0.05,
                "Horizontal layout",
            )
            .damp(
                "button_in_group",
                Predicate::NameAny(&["group", "segmented"]),
                0.5,
                "Name suggests a group of buttons",
            ),
    )
}

pub fn checkbox() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Checkbox,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["checkbox"]),
                    0.6,
                    "Name contains 'checkbox'",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["check", "tick"],
                        except: &["checkout", "ticket"],
                    },
                    0.3,
                    "Name suggests a check control",
                ),
            ])
            .add(
                Predicate::ChildNamed(&["indicator", "checkmark", "box"]),
                0.1,
                "Has a check indicator",
            )
            .add(
                Predicate::AnyOf(vec![
                    Predicate::ChildNamed(&["label"]),
                    Predicate::ChildKind(NodeKind::Text),
                ]),
                0.05,
                "Has a label",
            )
            .add(
                Predicate::AllOf(vec![
                    Predicate::RoughlySquare(0.15),
                    Predicate::MaxDimensionAtMost(32.0),
                ]),
                0.1,
                "Small square box",
            )
            .add(Predicate::HasStroke, 0.05, "Has a border"),
    )
}

const GROUP_RADIO_NAMES: &[&str] = &["radio group", "radio list", "radios"];

pub fn radio() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Radio,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["radio button"]),
                    0.65,
                    "Name matches 'radio button'",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["radio"],
                        except: GROUP_RADIO_NAMES,
                    },
                    0.5,
                    "Name contains 'radio'",
                ),
            ])
            .add(
                Predicate::ChildNamed(&["indicator", "dot", "circle"]),
                0.1,
                "Has a selection indicator",
            )
            .add(
                Predicate::AllOf(vec![
                    Predicate::RoughlySquare(0.15),
                    Predicate::MaxDimensionAtMost(32.0),
                    Predicate::FullyRounded,
                ]),
                0.15,
                "Small circle",
            )
            .add(
                Predicate::ChildKind(NodeKind::Text),
                0.05,
                "Has a text label",
            )
            .damp(
                "radio_in_group",
                Predicate::NameAny(&["group", "options", "choices", "set"]),
                0.4,
                "Name suggests a set of radios",
            ),
    )
}

pub fn radio_group() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::RadioGroup,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["radio group"]),
                    0.65,
                    "Name matches 'radio group'",
                ),
                clause(
                    Predicate::NameAny(&["radios", "radio list", "radio options", "option group"]),
                    0.45,
                    "Name suggests radio options",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["radio"],
                        except: &["radio button"],
                    },
                    0.3,
                    "Name contains 'radio'",
                ),
            ])
            .add(
                Predicate::DescendantsNamedAtLeast {
                    terms: &["radio", "option"],
                    min: 2,
                },
                0.15,
                "Contains two or more options",
            )
            .add(
                Predicate::Layout(LayoutMode::Vertical),
                0.05,
                "Vertical layout",
            )
            .damp(
                "radio_group_single",
                Predicate::NameIs(&["radio", "radio button", "radio item"]),
                0.5,
                "Name is a single radio",
            ),
    )
}

pub fn switch() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Switch,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["switch"]),
                    0.6,
                    "Name contains 'switch'",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["toggle"],
                        except: &["toggle group", "toggle button"],
                    },
                    0.35,
                    "Name contains 'toggle'",
                ),
            ])
            .add(
                Predicate::ChildNamed(&["thumb", "knob", "handle"]),
                0.15,
                "Has a thumb",
            )
            .add(
                Predicate::AllOf(vec![
                    Predicate::AspectAtLeast(1.5),
                    Predicate::AspectAtMost(2.6),
                    Predicate::FullyRounded,
                ]),
                0.15,
                "Pill-shaped track",
            ),
    )
}

pub fn slider() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Slider,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["slider"]),
                    0.65,
                    "Name contains 'slider'",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["range"],
                        except: &["orange", "arrange", "strange"],
                    },
                    0.35,
                    "Name contains 'range'",
                ),
            ])
            .first_of(vec![
                clause(
                    Predicate::AllOf(vec![
                        Predicate::DescendantNamed(&["track", "rail"]),
                        Predicate::DescendantNamed(&["thumb", "handle", "knob"]),
                    ]),
                    0.25,
                    "Has track and thumb",
                ),
                clause(
                    Predicate::DescendantNamed(&["track", "rail"]),
                    0.1,
                    "Has a track",
                ),
                clause(
                    Predicate::DescendantNamed(&["thumb", "handle", "knob"]),
                    0.1,
                    "Has a thumb",
                ),
            ])
            .add(
                Predicate::ElongationAtLeast(4.0),
                0.1,
                "Long thin proportions",
            ),
    )
}

pub fn input() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Input,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["input", "text field", "textbox", "text input"],
                        except: &["textarea"],
                    },
                    0.6,
                    "Name suggests a text input",
                ),
                clause(
                    Predicate::NameAny(&["search", "email", "password"]),
                    0.3,
                    "Name suggests an entry field",
                ),
            ])
            .add(
                Predicate::ChildNamed(&["placeholder", "value"]),
                0.15,
                "Has a placeholder",
            )
            .add(Predicate::HasStroke, 0.05, "Has a border")
            .add(
                Predicate::ChildKind(NodeKind::Text),
                0.05,
                "Has a text child",
            )
            .add(Predicate::AspectAtLeast(3.0), 0.05, "Wide proportions")
            .damp(
                "input_in_field",
                Predicate::NameAny(&["form field", "form item", "form control"]),
                0.5,
                "Name suggests a labelled field",
            ),
    )
}

pub fn textarea() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Textarea,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["textarea", "multiline"]),
                    0.65,
                    "Name suggests a textarea",
                ),
                clause(
                    Predicate::NameAny(&["comment box", "message box"]),
                    0.35,
                    "Name suggests free text",
                ),
            ])
            .add(
                Predicate::ChildNamed(&["placeholder"]),
                0.1,
                "Has a placeholder",
            )
            .add(
                Predicate::ChildNamed(&["resize", "grip"]),
                0.1,
                "Has a resize grip",
            )
            .add(Predicate::HasStroke, 0.05, "Has a border"),
    )
}

pub fn field() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Field,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["form field", "form item", "form control"]),
                    0.6,
                    "Name suggests a form field",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["field"],
                        except: &["text field", "search field"],
                    },
                    0.35,
                    "Name contains 'field'",
                ),
            ])
            .first_of(vec![
                clause(
                    Predicate::AllOf(vec![
                        Predicate::ChildNamed(&["label"]),
                        Predicate::ChildNamed(FIELD_CONTROL_TERMS),
                    ]),
                    0.3,
                    "Has label and control children",
                ),
                clause(Predicate::ChildNamed(&["label"]), 0.1, "Has a label child"),
                clause(
                    Predicate::ChildNamed(FIELD_CONTROL_TERMS),
                    0.1,
                    "Has a control child",
                ),
            ])
            .add(
                Predicate::ChildNamed(&["description", "helper", "hint", "error", "message"]),
                0.1,
                "Has helper or error text",
            )
            .add(
                Predicate::Layout(LayoutMode::Vertical),
                0.05,
                "Vertical layout",
            ),
    )
}

pub fn form() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Form,
        Evidence::new()
            .add(
                Predicate::NameAnyExcept {
                    terms: &["form"],
                    except: &[
                        "format",
                        "platform",
                        "transform",
                        "form field",
                        "form item",
                        "form control",
                        "information",
                        "uniform",
                        "perform",
                    ],
                },
                0.55,
                "Name contains 'form'",
            )
            .add(
                Predicate::DescendantsNamedAtLeast {
                    terms: &["field", "input", "textarea", "select", "checkbox"],
                    min: 2,
                },
                0.15,
                "Contains two or more fields",
            )
            .add(
                Predicate::DescendantNamed(&["submit"]),
                0.1,
                "Has a submit control",
            )
            .add(
                Predicate::Layout(LayoutMode::Vertical),
                0.05,
                "Vertical layout",
            ),
    )
}

pub fn toggle_group() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::ToggleGroup,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["toggle group", "segmented", "button group"]),
                    0.65,
                    "Name suggests a toggle group",
                ),
                clause(
                    Predicate::NameAny(&["toolbar"]),
                    0.3,
                    "Name contains 'toolbar'",
                ),
            ])
            .add(
                Predicate::DescendantsNamedAtLeast {
                    terms: &["toggle", "item", "option", "segment"],
                    min: 2,
                },
                0.15,
                "Contains two or more toggles",
            )
            .add(
                Predicate::Layout(LayoutMode::Horizontal),
                0.05,
                "Horizontal layout",
            ),
    )
}

pub fn classifiers() -> Vec<RuleClassifier> {
    vec![
        button(),
        checkbox(),
        radio(),
        radio_group(),
        switch(),
        slider(),
        input(),
        textarea(),
        field(),
        form(),
        toggle_group(),
    ]
}
