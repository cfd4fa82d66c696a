use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical component types the engine can recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentType {
    Accordion,
    Alert,
    AlertDialog,
    Avatar,
    Badge,
    Breadcrumb,
    Button,
    Card,
    Checkbox,
    ContextMenu,
    Dialog,
    DropdownMenu,
    Field,
    Form,
    Image,
    Input,
    Kbd,
    Menubar,
    NavigationMenu,
    Pagination,
    Popover,
    Progress,
    Radio,
    RadioGroup,
    Select,
    Separator,
    Sheet,
    Slider,
    Switch,
    Tabs,
    Textarea,
    ToggleGroup,
    Tooltip,
}

/// Bumped whenever the order of [`PRIORITY_TABLE`] changes, since cached
/// results that relied on a tie-break become stale.
pub const PRIORITY_TABLE_VERSION: u32 = 2;

/// Tie-break order, most specific first. Only consulted when two types score
/// exactly the same confidence.
pub const PRIORITY_TABLE: &[ComponentType] = &[
    ComponentType::AlertDialog,
    ComponentType::ContextMenu,
    ComponentType::Menubar,
    ComponentType::NavigationMenu,
    ComponentType::DropdownMenu,
    ComponentType::Select,
    ComponentType::ToggleGroup,
    ComponentType::RadioGroup,
    ComponentType::Radio,
    ComponentType::Tabs,
    ComponentType::Pagination,
    ComponentType::Breadcrumb,
    ComponentType::Accordion,
    ComponentType::Sheet,
    ComponentType::Dialog,
    ComponentType::Popover,
    ComponentType::Tooltip,
    ComponentType::Field,
    ComponentType::Textarea,
    ComponentType::Input,
    ComponentType::Form,
    ComponentType::Checkbox,
    ComponentType::Switch,
    ComponentType::Slider,
    ComponentType::Progress,
    ComponentType::Alert,
    ComponentType::Card,
    ComponentType::Avatar,
    ComponentType::Image,
    ComponentType::Kbd,
    ComponentType::Badge,
    ComponentType::Button,
    ComponentType::Separator,
];

impl ComponentType {
    pub const ALL: [ComponentType; 33] = [
        ComponentType::Accordion,
        ComponentType::Alert,
        ComponentType::AlertDialog,
        ComponentType::Avatar,
        ComponentType::Badge,
        ComponentType::Breadcrumb,
        ComponentType::Button,
        ComponentType::Card,
        ComponentType::Checkbox,
        ComponentType::ContextMenu,
        ComponentType::Dialog,
        ComponentType::DropdownMenu,
        ComponentType::Field,
        ComponentType::Form,
        ComponentType::Image,
        ComponentType::Input,
        ComponentType::Kbd,
        ComponentType::Menubar,
        ComponentType::NavigationMenu,
        ComponentType::Pagination,
        ComponentType::Popover,
        ComponentType::Progress,
        ComponentType::Radio,
        ComponentType::RadioGroup,
        ComponentType::Select,
        ComponentType::Separator,
        ComponentType::Sheet,
        ComponentType::Slider,
        ComponentType::Switch,
        ComponentType::Tabs,
        ComponentType::Textarea,
        ComponentType::ToggleGroup,
        ComponentType::Tooltip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Accordion => "Accordion",
            ComponentType::Alert => "Alert",
            ComponentType::AlertDialog => "AlertDialog",
            ComponentType::Avatar => "Avatar",
            ComponentType::Badge => "Badge",
            ComponentType::Breadcrumb => "Breadcrumb",
            ComponentType::Button => "Button",
            ComponentType::Card => "Card",
            ComponentType::Checkbox => "Checkbox",
            ComponentType::ContextMenu => "ContextMenu",
            ComponentType::Dialog => "Dialog",
            ComponentType::DropdownMenu => "DropdownMenu",
            ComponentType::Field => "Field",
            ComponentType::Form => "Form",
            ComponentType::Image => "Image",
            ComponentType::Input => "Input",
            ComponentType::Kbd => "Kbd",
            ComponentType::Menubar => "Menubar",
            ComponentType::NavigationMenu => "NavigationMenu",
            ComponentType::Pagination => "Pagination",
            ComponentType::Popover => "Popover",
            ComponentType::Progress => "Progress",
            ComponentType::Radio => "Radio",
            ComponentType::RadioGroup => "RadioGroup",
            ComponentType::Select => "Select",
            ComponentType::Separator => "Separator",
            ComponentType::Sheet => "Sheet",
            ComponentType::Slider => "Slider",
            ComponentType::Switch => "Switch",
            ComponentType::Tabs => "Tabs",
            ComponentType::Textarea => "Textarea",
            ComponentType::ToggleGroup => "ToggleGroup",
            ComponentType::Tooltip => "Tooltip",
        }
    }

    /// Position in [`PRIORITY_TABLE`]; lower wins a tie.
    pub fn priority(&self) -> usize {
        PRIORITY_TABLE
            .iter()
            .position(|t| t == self)
            .unwrap_or(PRIORITY_TABLE.len())
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = crate::node::compact(s);
        ComponentType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown component type: {}", s))
    }
}
