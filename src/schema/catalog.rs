//! Built-in slot schemas for every classifiable component type.
//!
//! Slot rules follow one pattern: an exact name is strong evidence, a name
//! containing the slot vocabulary is good evidence, and layer kind or fill
//! adds a smaller amount. Slots are declared in binding order; within one
//! level a node binds to the first slot that accepts it. Slots nested under a
//! repeatable slot draw from every repetition at once, so they repeat too.

use super::{SlotDefinition, SlotSchema};
use crate::component_type::ComponentType;
use crate::evidence::{clause, pattern, Evidence, Predicate};
use crate::node::NodeKind;

const EXACT: f64 = 0.9;
const CONTAINS: f64 = 0.7;
const LOOSE: f64 = 0.5;

const TRIGGER: &[&str] = &["trigger", "anchor", "activator"];
const CONTENT: &[&str] = &["content", "body", "panel"];
const ITEM: &[&str] = &["item", "option"];
const TITLE: &[&str] = &["title", "heading"];
const DESCRIPTION: &[&str] = &["description", "subtitle", "caption"];
const LABEL: &[&str] = &["label"];
const ICON: &[&str] = &["icon", "glyph"];
const SEPARATOR: &[&str] = &["separator", "divider"];
const CLOSE: &[&str] = &["close", "dismiss"];

/// Tiered name evidence: exact slot name, then containment, then synonyms.
fn named(exact: &'static [&'static str], loose: &'static [&'static str]) -> Evidence {
    Evidence::new().first_of(vec![
        clause(Predicate::NameIs(exact), EXACT, "Name is the slot name"),
        clause(Predicate::NameAny(exact), CONTAINS, "Name contains the slot name"),
        clause(Predicate::NameAny(loose), LOOSE, "Name resembles the slot"),
    ])
}

fn text_layer(evidence: Evidence, weight: f64) -> Evidence {
    evidence.add(Predicate::KindIs(NodeKind::Text), weight, "Is a text layer")
}

fn shape_layer(evidence: Evidence, weight: f64) -> Evidence {
    evidence.add(Predicate::KindIs(NodeKind::Shape), weight, "Is a vector shape")
}

fn trigger() -> SlotDefinition {
    SlotDefinition::required("trigger", named(TRIGGER, &["button", "toggle"]))
}

fn optional_trigger() -> SlotDefinition {
    SlotDefinition::optional("trigger", named(TRIGGER, &["button", "toggle"]))
}

fn title() -> SlotDefinition {
    SlotDefinition::required("title", text_layer(named(TITLE, &["headline"]), 0.2))
}

fn description() -> SlotDefinition {
    SlotDefinition::optional(
        "description",
        text_layer(named(DESCRIPTION, &["message", "text"]), 0.2),
    )
}

fn header() -> SlotDefinition {
    SlotDefinition::optional("header", named(&["header"], &["top"]))
        .with_children(vec![title(), description()])
}

fn footer() -> SlotDefinition {
    SlotDefinition::optional("footer", named(&["footer"], &["actions", "bottom"]))
}

fn close() -> SlotDefinition {
    SlotDefinition::optional("close", named(CLOSE, &["cross"]))
}

fn overlay() -> SlotDefinition {
    SlotDefinition::optional("overlay", named(&["overlay"], &["backdrop", "scrim"]))
}

fn label(text_weight: f64) -> SlotDefinition {
    SlotDefinition::optional("label", text_layer(named(LABEL, &["text"]), text_weight))
}

fn icon() -> SlotDefinition {
    SlotDefinition::optional("icon", shape_layer(named(ICON, &["chevron", "caret"]), 0.2))
}

fn item() -> SlotDefinition {
    SlotDefinition::required("item", named(ITEM, &["entry"])).multiple()
}

fn separator() -> SlotDefinition {
    SlotDefinition::optional("separator", named(SEPARATOR, &["line", "rule"])).multiple()
}

/// Item list shared by the menu types and Select. Items may sit directly
/// in the content or inside groups.
fn menu_content(required: bool) -> SlotDefinition {
    let content = named(CONTENT, &["menu", "list", "popup"]);
    let slot = if required {
        SlotDefinition::required("content", content)
    } else {
        SlotDefinition::optional("content", content)
    };
    let group_label = || named(LABEL, &["heading", "group title"]);
    slot.with_children(vec![
        SlotDefinition::optional("label", group_label()).multiple(),
        separator(),
        SlotDefinition::optional("group", named(&["group"], &["section"]))
            .multiple()
            .with_children(vec![
                SlotDefinition::optional("label", group_label()).multiple(),
                item(),
            ]),
        item().covered_by("group"),
    ])
}

pub fn schemas() -> Vec<SlotSchema> {
    use ComponentType::*;
    vec![
        SlotSchema::new(
            Accordion,
            vec![
                SlotDefinition::required("item", named(ITEM, &["section", "disclosure"]))
                    .multiple()
                    .with_children(vec![
                        SlotDefinition::required(
                            "trigger",
                            text_layer(named(TRIGGER, &["header", "title", "summary"]), 0.2),
                        )
                        .multiple(),
                        SlotDefinition::optional("content", named(CONTENT, &["details"]))
                            .multiple(),
                    ]),
            ],
        ),
        SlotSchema::new(
            Alert,
            vec![
                icon(),
                SlotDefinition::required("title", text_layer(named(TITLE, &["headline"]), 0.3)),
                description(),
                SlotDefinition::optional("action", named(&["action"], &["button", "link"])),
                close(),
            ],
        ),
        SlotSchema::new(
            AlertDialog,
            vec![
                optional_trigger(),
                overlay(),
                title(),
                description(),
                SlotDefinition::optional("footer", named(&["footer"], &["actions", "buttons"]))
                    .with_children(vec![
                        SlotDefinition::required("cancel", named(&["cancel"], &["back"])),
                        SlotDefinition::required(
                            "action",
                            named(&["action"], &["confirm", "continue", "delete", "yes"]),
                        ),
                    ]),
            ],
        ),
        SlotSchema::new(
            Avatar,
            vec![
                SlotDefinition::optional(
                    "image",
                    named(&["image"], &["img", "photo", "picture"])
                        .add(Predicate::HasImageFill, 0.5, "Has an image fill"),
                ),
                SlotDefinition::optional(
                    "fallback",
                    text_layer(named(&["fallback"], &["initials"]), 0.3),
                ),
            ],
        ),
        SlotSchema::new(
            Badge,
            vec![
                icon(),
                SlotDefinition::required(
                    "label",
                    text_layer(named(LABEL, &["text", "value"]), 0.5),
                ),
            ],
        ),
        SlotSchema::new(
            Breadcrumb,
            vec![
                SlotDefinition::optional(
                    "separator",
                    shape_layer(named(SEPARATOR, &["chevron", "slash", "arrow"]), 0.2),
                )
                .multiple(),
                SlotDefinition::optional("ellipsis", named(&["ellipsis"], &["more", "overflow"])),
                SlotDefinition::required(
                    "item",
                    text_layer(named(&["item", "crumb"], &["link", "page"]), 0.45),
                )
                .multiple(),
            ],
        ),
        SlotSchema::new(
            Button,
            vec![
                SlotDefinition::optional(
                    "icon",
                    shape_layer(named(ICON, &["arrow", "chevron", "spinner"]), 0.3),
                ),
                SlotDefinition::required(
                    "label",
                    text_layer(named(LABEL, &["text", "title", "caption"]), 0.5),
                ),
            ],
        ),
        SlotSchema::new(
            Card,
            vec![
                header(),
                SlotDefinition::optional(
                    "image",
                    named(&["image", "media"], &["cover", "thumbnail"]).add(
                        Predicate::HasImageFill,
                        0.4,
                        "Has an image fill",
                    ),
                ),
                SlotDefinition::required(
                    "content",
                    named(CONTENT, &["main", "details"]).add(
                        Predicate::KindIs(NodeKind::Frame),
                        0.3,
                        "Is a container frame",
                    ),
                ),
                footer(),
            ],
        ),
        SlotSchema::new(
            Checkbox,
            vec![
                SlotDefinition::required(
                    "indicator",
                    shape_layer(
                        named(&["indicator", "checkmark"], &["check", "box", "tick"]),
                        0.3,
                    ),
                ),
                label(0.5),
            ],
        ),
        SlotSchema::new(ContextMenu, vec![trigger(), menu_content(true)]),
        SlotSchema::new(
            Dialog,
            vec![
                optional_trigger(),
                overlay(),
                header(),
                SlotDefinition::required("content", named(CONTENT, &["main", "form"])),
                footer(),
                close(),
            ],
        ),
        SlotSchema::new(DropdownMenu, vec![trigger(), menu_content(true)]),
        SlotSchema::new(
            Field,
            vec![
                SlotDefinition::required("label", text_layer(named(LABEL, &["name"]), 0.3)),
                SlotDefinition::required(
                    "control",
                    named(
                        &["control"],
                        &["input", "textfield", "textarea", "select", "checkbox"],
                    )
                    .add(
                        Predicate::KindIs(NodeKind::Instance),
                        0.3,
                        "Is a component instance",
                    ),
                ),
                SlotDefinition::optional(
                    "description",
                    text_layer(named(&["description", "helper"], &["hint", "help"]), 0.1),
                ),
                SlotDefinition::optional("error", named(&["error"], &["validation", "invalid"])),
            ],
        ),
        SlotSchema::new(
            Form,
            vec![
                SlotDefinition::optional("title", named(TITLE, &["headline"])),
                SlotDefinition::optional("submit", named(&["submit"], &["button", "cta", "save"])),
                SlotDefinition::required(
                    "field",
                    named(&["field", "formitem"], &["input", "textarea", "select", "checkbox"]),
                )
                .multiple(),
            ],
        ),
        SlotSchema::new(
            Image,
            vec![SlotDefinition::optional(
                "caption",
                text_layer(named(&["caption"], &["alt", "credit"]), 0.3),
            )],
        ),
        SlotSchema::new(
            Input,
            vec![
                SlotDefinition::optional(
                    "icon",
                    shape_layer(
                        named(ICON, &["search", "leading", "trailing", "prefix", "suffix"]),
                        0.3,
                    ),
                ),
                SlotDefinition::optional(
                    "value",
                    text_layer(named(&["value", "placeholder"], &["text", "label"]), 0.5),
                ),
            ],
        ),
        SlotSchema::new(
            Kbd,
            vec![SlotDefinition::optional(
                "key",
                text_layer(named(&["key", "label"], &["shortcut", "text"]), 0.5),
            )],
        ),
        SlotSchema::new(
            Menubar,
            vec![
                SlotDefinition::required("menu", named(&["menu"], &["file", "edit", "view"]))
                    .multiple()
                    .with_children(vec![
                        SlotDefinition::required(
                            "trigger",
                            text_layer(named(TRIGGER, &["label", "title"]), 0.3),
                        )
                        .multiple(),
                        menu_content(false).multiple(),
                    ]),
            ],
        ),
        SlotSchema::new(
            NavigationMenu,
            vec![
                SlotDefinition::optional(
                    "indicator",
                    named(&["indicator"], &["underline", "highlight"]),
                ),
                SlotDefinition::optional(
                    "viewport",
                    named(&["viewport"], &["dropdown", "flyout"]),
                ),
                SlotDefinition::required(
                    "item",
                    named(&["item", "link"], &["navitem", "entry", "tab"]),
                )
                .multiple()
                .with_children(vec![
                    optional_trigger().multiple(),
                    SlotDefinition::optional("content", named(CONTENT, &["submenu", "links"]))
                        .multiple(),
                ]),
            ],
        ),
        SlotSchema::new(
            Pagination,
            vec![
                SlotDefinition::optional(
                    "previous",
                    named(&["previous", "prev"], &["back", "left"]),
                ),
                SlotDefinition::optional("next", named(&["next"], &["forward", "right"])),
                SlotDefinition::optional("ellipsis", named(&["ellipsis"], &["more", "gap"])),
                SlotDefinition::required(
                    "page",
                    named(&["page"], &["link", "item"]).add(
                        Predicate::NameMatches(pattern(r"^(page\s*)?\d+$")),
                        0.5,
                        "Name is a page number",
                    ),
                )
                .multiple(),
            ],
        ),
        SlotSchema::new(
            Popover,
            vec![
                trigger(),
                SlotDefinition::required("content", named(CONTENT, &["popup", "card"])),
                SlotDefinition::optional(
                    "arrow",
                    shape_layer(named(&["arrow"], &["pointer", "caret"]), 0.2),
                ),
                close(),
            ],
        ),
        SlotSchema::new(
            Progress,
            vec![
                SlotDefinition::required(
                    "indicator",
                    shape_layer(named(&["indicator", "fill"], &["bar", "value", "progress"]), 0.3),
                ),
                SlotDefinition::optional("track", named(&["track"], &["rail", "background"])),
                label(0.4),
            ],
        ),
        SlotSchema::new(
            Radio,
            vec![
                SlotDefinition::required(
                    "indicator",
                    shape_layer(named(&["indicator", "dot"], &["circle", "radio"]), 0.3),
                ),
                label(0.5),
            ],
        ),
        SlotSchema::new(
            RadioGroup,
            vec![
                SlotDefinition::required("item", named(&["item", "radio"], &["option", "choice"]))
                    .multiple()
                    .with_children(vec![
                        SlotDefinition::optional(
                            "indicator",
                            shape_layer(named(&["indicator"], &["circle", "radio"]), 0.3),
                        )
                        .multiple(),
                        label(0.5).multiple(),
                    ]),
            ],
        ),
        SlotSchema::new(
            Select,
            vec![
                SlotDefinition::required("trigger", named(TRIGGER, &["button", "field", "control"]))
                    .with_children(vec![
                        SlotDefinition::optional(
                            "value",
                            text_layer(
                                named(&["value", "placeholder"], &["selected", "text"]),
                                0.4,
                            ),
                        ),
                        icon(),
                    ]),
                menu_content(false),
            ],
        ),
        SlotSchema::new(Separator, vec![]),
        SlotSchema::new(
            Sheet,
            vec![
                optional_trigger(),
                overlay(),
                header(),
                SlotDefinition::required("content", named(CONTENT, &["drawer", "main"])),
                footer(),
                close(),
            ],
        ),
        SlotSchema::new(
            Slider,
            vec![
                SlotDefinition::required("track", named(&["track"], &["rail", "bar"]))
                    .with_children(vec![SlotDefinition::optional(
                        "range",
                        named(&["range"], &["fill", "active"]),
                    )]),
                SlotDefinition::required("thumb", named(&["thumb"], &["handle", "knob"]))
                    .multiple(),
            ],
        ),
        SlotSchema::new(
            Switch,
            vec![
                SlotDefinition::required(
                    "thumb",
                    shape_layer(named(&["thumb"], &["knob", "handle", "circle"]), 0.3),
                ),
                label(0.5),
            ],
        ),
        SlotSchema::new(
            Tabs,
            vec![
                SlotDefinition::required(
                    "list",
                    named(&["list", "tablist"], &["header", "bar", "tabs"]),
                )
                .with_children(vec![SlotDefinition::required(
                    "trigger",
                    named(&["trigger", "tab"], &["item", "option"]),
                )
                .multiple()]),
                SlotDefinition::optional("content", named(CONTENT, &["tabpanel", "view"]))
                    .multiple(),
            ],
        ),
        SlotSchema::new(
            Textarea,
            vec![
                SlotDefinition::optional(
                    "value",
                    text_layer(named(&["value", "placeholder"], &["text"]), 0.5),
                ),
                SlotDefinition::optional("resize", named(&["resize"], &["grip", "handle"])),
            ],
        ),
        SlotSchema::new(
            ToggleGroup,
            vec![SlotDefinition::required(
                "item",
                named(&["item", "toggle"], &["option", "segment"])
                    .add(Predicate::KindIs(NodeKind::Instance), 0.3, "Is a component instance"),
            )
            .multiple()],
        ),
        SlotSchema::new(
            Tooltip,
            vec![
                optional_trigger(),
                SlotDefinition::optional(
                    "arrow",
                    shape_layer(named(&["arrow"], &["pointer", "caret"]), 0.3),
                ),
                SlotDefinition::required(
                    "content",
                    text_layer(named(CONTENT, &["label", "text", "tip"]), 0.3),
                ),
            ],
        ),
    ]
}
