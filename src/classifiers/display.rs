//! Static display components: surfaces, media, status and decoration.

use super::RuleClassifier;
use crate::component_type::ComponentType;
use crate::evidence::{clause, pattern, Evidence, Predicate};
use crate::node::{LayoutMode, NodeKind};

pub fn card() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Card,
        Evidence::new()
            .add(
                Predicate::NameAnyExcept {
                    terms: &["card"],
                    except: &["credit card", "card number", "hover card", "cardinal"],
                },
                0.6,
                "Name contains 'card'",
            )
            .first_of(vec![
                clause(
                    Predicate::AllOf(vec![
                        Predicate::ChildNamed(&["header", "title"]),
                        Predicate::ChildNamed(&["content", "body"]),
                    ]),
                    0.25,
                    "Has header and content children",
                ),
                clause(
                    Predicate::ChildNamed(&["header", "title"]),
                    0.1,
                    "Has a header child",
                ),
                clause(
                    Predicate::ChildNamed(&["content", "body"]),
                    0.1,
                    "Has a content child",
                ),
            ])
            .add(
                Predicate::ChildNamed(&["footer", "actions"]),
                0.05,
                "Has a footer child",
            )
            .add(
                Predicate::AllOf(vec![Predicate::HasCornerRadius, Predicate::HasStroke]),
                0.05,
                "Bordered rounded surface",
            )
            .add(
                Predicate::Layout(LayoutMode::Vertical),
                0.05,
                "Vertical layout",
            ),
    )
}

pub fn alert() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Alert,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["alert", "callout"]),
                    0.6,
                    "Name suggests an alert",
                ),
                clause(
                    Predicate::NameAny(&["banner", "notification", "toast", "notice"]),
                    0.35,
                    "Name suggests a notice",
                ),
            ])
            .first_of(vec![
                clause(
                    Predicate::AllOf(vec![
                        Predicate::ChildNamed(&["title"]),
                        Predicate::ChildNamed(&["description", "message", "body"]),
                    ]),
                    0.25,
                    "Has title and description children",
                ),
                clause(Predicate::ChildNamed(&["title"]), 0.1, "Has a title child"),
                clause(
                    Predicate::ChildNamed(&["description", "message", "body"]),
                    0.1,
                    "Has a description child",
                ),
            ])
            .add(Predicate::ChildNamed(&["icon"]), 0.05, "Has an icon")
            .damp(
                "alert_in_dialog",
                Predicate::NameAny(&["dialog", "modal"]),
                0.4,
                "Name suggests a dialog",
            ),
    )
}

pub fn avatar() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Avatar,
        Evidence::new()
            .add(
                Predicate::NameAny(&[
                    "avatar",
                    "profile pic",
                    "profile photo",
                    "profile image",
                    "user pic",
                ]),
                0.6,
                "Name suggests an avatar",
            )
            .add(
                Predicate::AnyOf(vec![
                    Predicate::HasImageFill,
                    Predicate::ChildNamed(&["image", "img", "photo"]),
                ]),
                0.1,
                "Has an image",
            )
            .add(
                Predicate::AllOf(vec![Predicate::FullyRounded, Predicate::RoughlySquare(0.1)]),
                0.15,
                "Circular shape",
            )
            .add(
                Predicate::ChildNamed(&["fallback", "initials"]),
                0.05,
                "Has a fallback",
            ),
    )
}

pub fn badge() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Badge,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["badge"]),
                    0.6,
                    "Name contains 'badge'",
                ),
                clause(
                    Predicate::NameAnyExcept {
                        terms: &["chip", "pill", "tag"],
                        except: &["stage", "vintage", "hashtag", "tagline"],
                    },
                    0.35,
                    "Name suggests a tag",
                ),
            ])
            .add(
                Predicate::ChildKind(NodeKind::Text),
                0.05,
                "Has a text label",
            )
            .add(
                Predicate::AllOf(vec![Predicate::FullyRounded, Predicate::AspectAtLeast(1.5)]),
                0.1,
                "Pill shape",
            ),
    )
}

pub fn image() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Image,
        Evidence::new()
            .add(
                Predicate::NameAny(&["image", "img", "picture", "photo", "thumbnail"]),
                0.5,
                "Name suggests an image",
            )
            .add(Predicate::HasImageFill, 0.4, "Has an image fill")
            .damp(
                "image_in_avatar",
                Predicate::NameAny(&["avatar", "profile"]),
                0.5,
                "Name suggests an avatar",
            ),
    )
}

pub fn kbd() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Kbd,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["kbd", "keycap", "keyboard key", "hotkey"]),
                    0.65,
                    "Name suggests a key cap",
                ),
                clause(
                    Predicate::NameAny(&["shortcut"]),
                    0.4,
                    "Name contains 'shortcut'",
                ),
            ])
            .add(
                Predicate::AllOf(vec![
                    Predicate::RoughlySquare(0.3),
                    Predicate::MaxDimensionAtMost(40.0),
                ]),
                0.15,
                "Small square label",
            )
            .add(
                Predicate::AnyOf(vec![Predicate::HasText, Predicate::ChildKind(NodeKind::Text)]),
                0.1,
                "Carries a key label",
            ),
    )
}

pub fn progress() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Progress,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["progress bar"]),
                    0.65,
                    "Name matches 'progress bar'",
                ),
                clause(
                    Predicate::NameAny(&["progress", "loading bar"]),
                    0.55,
                    "Name suggests progress",
                ),
            ])
            .add(
                Predicate::ChildNamed(&["indicator", "fill", "bar", "value"]),
                0.1,
                "Has an indicator child",
            )
            .add(
                Predicate::ElongationAtLeast(8.0),
                0.1,
                "Long thin track",
            )
            .add(Predicate::FullyRounded, 0.05, "Rounded track"),
    )
}

pub fn separator() -> RuleClassifier {
    RuleClassifier::new(
        ComponentType::Separator,
        Evidence::new()
            .first_of(vec![
                clause(
                    Predicate::NameAny(&["separator", "divider"]),
                    0.65,
                    "Name suggests a separator",
                ),
                clause(
                    Predicate::NameMatches(pattern(r"^(line|hr|rule)(\s*\d+)?$")),
                    0.35,
                    "Named like a plain rule",
                ),
            ])
            .add(
                Predicate::ElongationAtLeast(20.0),
                0.15,
                "Thin long rectangle",
            )
            .add(Predicate::KindIs(NodeKind::Shape), 0.05, "Is a shape"),
    )
}

pub fn classifiers() -> Vec<RuleClassifier> {
    vec![
        card(),
        alert(),
        avatar(),
        badge(),
        image(),
        kbd(),
        progress(),
        separator(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::ComponentClassifier;
    use crate::node::{Node, Paint, PaintKind, Style};

    fn image_fill() -> Style {
        Style {
            fills: vec![Paint {
                kind: PaintKind::Image,
                color: None,
                opacity: None,
            }],
            ..Style::default()
        }
    }

    #[test]
    fn test_divider_geometry() {
        let named = Node::shape("1", "Divider").with_size(320.0, 1.0);
        let result = separator().classify(&named);
        assert!((result.confidence - 0.85).abs() < 1e-9, "{:?}", result);

        let bare = Node::shape("1", "Rectangle 4").with_size(320.0, 1.0);
        assert!(separator().classify(&bare).confidence < 0.3);

        let line = Node::shape("1", "Line 3");
        assert!((separator().classify(&line).confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_kbd_small_square_label() {
        let node = Node::frame("1", "Kbd")
            .with_size(24.0, 24.0)
            .with_child(Node::text("2", "Key", "K"));
        let result = kbd().classify(&node);
        assert!((result.confidence - 0.9).abs() < 1e-9, "{:?}", result);
    }

    #[test]
    fn test_avatar_damps_image() {
        let mut style = image_fill();
        style.corner_radius = Some(20.0);
        let node = Node::frame("1", "Avatar")
            .with_size(40.0, 40.0)
            .with_style(style);
        let avatar = avatar().classify(&node).confidence;
        let image = image().classify(&node).confidence;
        assert!((avatar - 0.85).abs() < 1e-9);
        assert!((image - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_unnamed_image_fill_is_an_image() {
        let node = Node::shape("1", "Rectangle 7").with_style(image_fill());
        assert!((image().classify(&node).confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_credit_card_is_not_a_card() {
        assert_eq!(card().classify(&Node::frame("1", "Credit Card Form")).confidence, 0.0);
        assert_eq!(card().classify(&Node::frame("1", "Card")).confidence, 0.6);
    }

    #[test]
    fn test_alert_damped_inside_dialog_name() {
        let node = Node::frame("1", "Alert Dialog");
        assert!((alert().classify(&node).confidence - 0.24).abs() < 1e-9);
    }
}
