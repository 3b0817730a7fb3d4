//! React (JSX) exporter.

use crate::{css, indent, ordered_props};
use swatch_core::model::Styling;
use swatch_core::props::{PropValue, Props, format_num};
use swatch_core::registry::ComponentDefinition;

/// Everything a template needs to render one component.
pub struct JsxContext<'a> {
    pub definition: &'a ComponentDefinition,
    pub props: &'a Props,
    /// Pre-rendered JSX attributes, with a leading space when non-empty.
    pub attrs: String,
}

impl JsxContext<'_> {
    fn text(&self, name: &str, fallback: &str) -> String {
        self.props
            .get(name)
            .map(|v| v.to_string())
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// A component-specific template: the `import` names it needs and the
/// JSX body.
pub struct ReactTemplate {
    /// Named imports from the component's own module. Empty means just the
    /// component symbol.
    pub symbols: &'static [&'static str],
    /// Further import lines.
    pub extra_imports: &'static [&'static str],
    pub jsx: fn(&JsxContext) -> String,
}

const LABEL_IMPORT: &str = "import { Label } from '@/components/ui/label';";
const BUTTON_IMPORT: &str = "import { Button } from '@/components/ui/button';";

const TEMPLATES: &[(&str, ReactTemplate)] = &[
    ("button", ReactTemplate { symbols: &[], extra_imports: &[], jsx: button }),
    ("checkbox", ReactTemplate { symbols: &[], extra_imports: &[LABEL_IMPORT], jsx: checkbox }),
    ("switch", ReactTemplate { symbols: &[], extra_imports: &[LABEL_IMPORT], jsx: switch }),
    ("badge", ReactTemplate { symbols: &[], extra_imports: &[], jsx: badge }),
    ("label", ReactTemplate { symbols: &[], extra_imports: &[], jsx: label }),
    (
        "card",
        ReactTemplate {
            symbols: &["Card", "CardHeader", "CardTitle", "CardDescription", "CardContent", "CardFooter"],
            extra_imports: &[],
            jsx: card,
        },
    ),
    (
        "avatar",
        ReactTemplate { symbols: &["Avatar", "AvatarImage", "AvatarFallback"], extra_imports: &[], jsx: avatar },
    ),
    (
        "tooltip",
        ReactTemplate {
            symbols: &["Tooltip", "TooltipProvider", "TooltipTrigger", "TooltipContent"],
            extra_imports: &[BUTTON_IMPORT],
            jsx: tooltip,
        },
    ),
    (
        "tabs",
        ReactTemplate { symbols: &["Tabs", "TabsList", "TabsTrigger", "TabsContent"], extra_imports: &[], jsx: tabs },
    ),
    (
        "alert",
        ReactTemplate { symbols: &["Alert", "AlertTitle", "AlertDescription"], extra_imports: &[], jsx: alert },
    ),
    (
        "accordion",
        ReactTemplate {
            symbols: &["Accordion", "AccordionItem", "AccordionTrigger", "AccordionContent"],
            extra_imports: &[],
            jsx: accordion,
        },
    ),
    (
        "table",
        ReactTemplate {
            symbols: &["Table", "TableBody", "TableCell", "TableHead", "TableHeader", "TableRow"],
            extra_imports: &[],
            jsx: table,
        },
    ),
];

fn template_for(id: &str) -> Option<&'static ReactTemplate> {
    TEMPLATES.iter().find(|(key, _)| *key == id).map(|(_, t)| t)
}

/// JSX attributes for every prop except `children`. Strings become
/// `key="v"`, numbers `key={n}`, `true` a bare flag; `false` is omitted.
pub fn jsx_attributes(definition: &ComponentDefinition, props: &Props) -> String {
    let attrs: Vec<String> = ordered_props(definition, props)
        .into_iter()
        .filter(|(key, _)| *key != "children")
        .filter_map(|(key, value)| match value {
            PropValue::Text(s) | PropValue::Enum(s) | PropValue::Node(s) => {
                Some(format!("{key}=\"{s}\""))
            }
            PropValue::Color(c) => Some(format!("{key}=\"{}\"", c.to_hex())),
            PropValue::Number(n) => Some(format!("{key}={{{}}}", format_num(*n))),
            PropValue::Bool(true) => Some(key.to_string()),
            PropValue::Bool(false) => None,
        })
        .collect();
    if attrs.is_empty() {
        String::new()
    } else {
        format!(" {}", attrs.join(" "))
    }
}

pub fn generate(definition: &ComponentDefinition, props: &Props, styling: Styling) -> String {
    let ctx = JsxContext {
        definition,
        props,
        attrs: jsx_attributes(definition, props),
    };
    let import_path = format!("@/components/ui/{}", definition.id);
    let template = template_for(definition.id.as_str());

    let symbols = match template {
        Some(t) if !t.symbols.is_empty() => t.symbols.join(", "),
        _ => definition.name.clone(),
    };
    let mut imports = vec![format!("import {{ {symbols} }} from '{import_path}';")];
    if let Some(t) = template {
        imports.extend(t.extra_imports.iter().map(|line| line.to_string()));
    }

    let jsx = match template {
        Some(t) => (t.jsx)(&ctx),
        None => fallback(&ctx),
    };

    let mut out = format!(
        "{}\n\nexport default function Component() {{\n  return (\n{}\n  );\n}}\n",
        imports.join("\n"),
        indent(&jsx, 4)
    );
    if styling == Styling::Css {
        let sheet = css::stylesheet(&jsx);
        out.push_str("\n/* styles.css */\n");
        if sheet.is_empty() {
            out.push_str("/* No utility classes to convert. */\n");
        } else {
            out.push_str(&sheet);
            out.push('\n');
        }
    }
    out
}

// ─── Templates ───────────────────────────────────────────────────────────

fn fallback(ctx: &JsxContext) -> String {
    format!("<{}{} />", ctx.definition.name, ctx.attrs)
}

fn button(ctx: &JsxContext) -> String {
    format!("<Button{}>\n  {}\n</Button>", ctx.attrs, ctx.text("children", "Button"))
}

fn checkbox(ctx: &JsxContext) -> String {
    format!(
        "<div className=\"flex items-center space-x-2\">\n  <Checkbox{} id=\"checkbox\" />\n  <Label htmlFor=\"checkbox\">Checkbox</Label>\n</div>",
        ctx.attrs
    )
}

fn switch(ctx: &JsxContext) -> String {
    format!(
        "<div className=\"flex items-center space-x-2\">\n  <Switch{} id=\"switch\" />\n  <Label htmlFor=\"switch\">Switch</Label>\n</div>",
        ctx.attrs
    )
}

fn badge(ctx: &JsxContext) -> String {
    format!("<Badge{}>{}</Badge>", ctx.attrs, ctx.text("children", "Badge"))
}

fn label(ctx: &JsxContext) -> String {
    format!("<Label{}>{}</Label>", ctx.attrs, ctx.text("children", "Label"))
}

fn card(_: &JsxContext) -> String {
    "<Card className=\"w-[350px]\">\n  <CardHeader>\n    <CardTitle>Card Title</CardTitle>\n    <CardDescription>Card Description</CardDescription>\n  </CardHeader>\n  <CardContent>\n    <p>Card content goes here.</p>\n  </CardContent>\n  <CardFooter>\n    <p className=\"text-sm text-muted-foreground\">Card Footer</p>\n  </CardFooter>\n</Card>".to_string()
}

fn avatar(_: &JsxContext) -> String {
    "<Avatar>\n  <AvatarImage src=\"https://github.com/shadcn.png\" alt=\"Avatar\" />\n  <AvatarFallback>CN</AvatarFallback>\n</Avatar>".to_string()
}

fn tooltip(ctx: &JsxContext) -> String {
    format!(
        "<TooltipProvider>\n  <Tooltip>\n    <TooltipTrigger asChild>\n      <Button variant=\"outline\">Hover me</Button>\n    </TooltipTrigger>\n    <TooltipContent>\n      <p>{}</p>\n    </TooltipContent>\n  </Tooltip>\n</TooltipProvider>",
        ctx.text("content", "Tooltip content")
    )
}

fn tabs(_: &JsxContext) -> String {
    "<Tabs defaultValue=\"tab1\" className=\"w-[400px]\">\n  <TabsList>\n    <TabsTrigger value=\"tab1\">Tab 1</TabsTrigger>\n    <TabsTrigger value=\"tab2\">Tab 2</TabsTrigger>\n  </TabsList>\n  <TabsContent value=\"tab1\">Content for Tab 1</TabsContent>\n  <TabsContent value=\"tab2\">Content for Tab 2</TabsContent>\n</Tabs>".to_string()
}

fn alert(ctx: &JsxContext) -> String {
    format!(
        "<Alert{}>\n  <AlertTitle>Alert Title</AlertTitle>\n  <AlertDescription>This is an alert description.</AlertDescription>\n</Alert>",
        ctx.attrs
    )
}

fn accordion(ctx: &JsxContext) -> String {
    format!(
        "<Accordion type=\"{}\" collapsible className=\"w-[400px]\">\n  <AccordionItem value=\"item-1\">\n    <AccordionTrigger>Accordion Item 1</AccordionTrigger>\n    <AccordionContent>Content for item 1</AccordionContent>\n  </AccordionItem>\n</Accordion>",
        ctx.text("type", "single")
    )
}

fn table(_: &JsxContext) -> String {
    "<Table>\n  <TableHeader>\n    <TableRow>\n      <TableHead>Column 1</TableHead>\n      <TableHead>Column 2</TableHead>\n    </TableRow>\n  </TableHeader>\n  <TableBody>\n    <TableRow>\n      <TableCell>Cell 1</TableCell>\n      <TableCell>Cell 2</TableCell>\n    </TableRow>\n  </TableBody>\n</Table>".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swatch_core::id::ComponentId;
    use swatch_core::registry::Registry;

    fn def(id: &str) -> ComponentDefinition {
        Registry::builtin()
            .definition(ComponentId::intern(id))
            .cloned()
            .unwrap()
    }

    #[test]
    fn attributes_follow_schema_order() {
        let button = def("button");
        let mut props = button.default_props.clone();
        props.insert("disabled".into(), PropValue::Bool(true));
        assert_eq!(
            jsx_attributes(&button, &props),
            r#" variant="default" size="default" disabled"#
        );

        props.insert("disabled".into(), PropValue::Bool(false));
        assert_eq!(
            jsx_attributes(&button, &props),
            r#" variant="default" size="default""#
        );
    }

    #[test]
    fn numbers_are_braced() {
        let textarea = def("textarea");
        assert_eq!(
            jsx_attributes(&textarea, &textarea.default_props),
            r#" placeholder="Type your message..." rows={4}"#
        );
    }

    #[test]
    fn button_export() {
        let button = def("button");
        let code = generate(&button, &button.default_props, Styling::Tailwind);
        assert_eq!(
            code,
            "import { Button } from '@/components/ui/button';\n\n\
             export default function Component() {\n  return (\n    \
             <Button variant=\"default\" size=\"default\">\n      Button\n    </Button>\n  );\n}\n"
        );
    }

    #[test]
    fn composite_imports() {
        let tooltip = def("tooltip");
        let code = generate(&tooltip, &Props::new(), Styling::Tailwind);
        assert!(code.starts_with(
            "import { Tooltip, TooltipProvider, TooltipTrigger, TooltipContent } from '@/components/ui/tooltip';\n\
             import { Button } from '@/components/ui/button';\n"
        ));
        assert!(code.contains("<p>Tooltip content</p>"));
    }

    #[test]
    fn fallback_is_self_closing() {
        let sheet = def("sheet");
        let code = generate(&sheet, &sheet.default_props, Styling::Tailwind);
        assert!(code.contains("    <Sheet side=\"right\" />\n"));
    }

    #[test]
    fn css_styling_appends_stylesheet() {
        let card = def("card");
        let code = generate(&card, &Props::new(), Styling::Css);
        assert!(code.contains("/* styles.css */\n.w-\\[350px\\] {\n  width: 350px;\n}"));
        assert!(code.contains(".text-sm {\n  font-size: 0.875rem;"));

        let avatar = def("avatar");
        let code = generate(&avatar, &Props::new(), Styling::Css);
        assert!(code.ends_with("/* No utility classes to convert. */\n"));
    }
}
