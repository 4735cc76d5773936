//! Depth-first flattening of an XML tree into a [`FlatConfig`].

use crate::console::Console;
use crate::flat::FlatConfig;
use crate::path::PathContext;
use crate::rule::{write_entry, ShapeRule};
use crate::tree::XmlNode;

/// Walks an XML document and records attributes and recognized
/// `add`/`remove`/`clear` sections as flattened keys.
pub struct ElementResolver<'a> {
    rules: &'a [ShapeRule],
    console: Option<&'a dyn Console>,
}

impl<'a> ElementResolver<'a> {
    /// Rules are tried in order; the first that recognizes an element handles it.
    pub fn new(rules: &'a [ShapeRule]) -> Self {
        Self {
            rules,
            console: None,
        }
    }

    pub fn with_console(mut self, console: Option<&'a dyn Console>) -> Self {
        self.console = console;
        self
    }

    /// Flatten everything below `root`. The root element itself contributes no segment.
    pub fn resolve(&self, root: &XmlNode) -> FlatConfig {
        let mut context = PathContext::new();
        let mut results = FlatConfig::new();
        for child in &root.children {
            self.visit(child, &child.name, &mut context, &mut results);
        }
        results
    }

    fn visit(
        &self,
        element: &XmlNode,
        segment: &str,
        context: &mut PathContext,
        results: &mut FlatConfig,
    ) {
        let depth = context.depth();
        context.push(segment);
        tracing::trace!(path = %context.path(), "visit");

        for attr in &element.attributes {
            write_entry(results, self.console, context.key_for(&attr.name), &attr.value);
        }

        match self.rules.iter().position(|rule| rule.recognizes(element)) {
            Some(index) => {
                tracing::debug!(path = %context.path(), rule = index, "handled by rule");
                self.rules[index].apply(element, context, results, self.console);
            }
            None => {
                for (name, members) in element.grouped_children() {
                    if let [only] = members.as_slice() {
                        self.visit(only, name, context, results);
                        continue;
                    }
                    context.push(name);
                    for (index, member) in members.iter().enumerate() {
                        self.visit(member, &index.to_string(), context, results);
                    }
                    context.pop();
                }
            }
        }

        context.pop();
        debug_assert_eq!(context.depth(), depth, "unbalanced path context");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::ElementResolver;
    use crate::flat::FlatConfig;
    use crate::parser::parse_str;
    use crate::path::PathContext;
    use crate::rule::ShapeRule;

    fn entries(config: &FlatConfig) -> Vec<(&str, &str)> {
        config.iter().collect()
    }

    #[test]
    fn context_is_balanced_for_every_branch() {
        let root = parse_str(
            r#"<configuration>
                 <appSettings><add key="A" value="1"/></appSettings>
                 <unsupported><add value="orphan"/></unsupported>
                 <items><item id="1"/><item id="2"/></items>
                 <empty/>
               </configuration>"#,
        )
        .expect("parse");
        let rules = ShapeRule::defaults();
        let resolver = ElementResolver::new(&rules);

        for child in &root.children {
            let mut context = PathContext::new();
            context.push("outer");
            let mut results = FlatConfig::new();
            resolver.visit(child, &child.name, &mut context, &mut results);
            assert_eq!(context.depth(), 1, "after visiting <{}>", child.name);
        }
    }

    #[test]
    fn repeated_siblings_are_indexed_under_shared_name() {
        let root = parse_str(
            r#"<configuration>
                 <servers><server host="a"/><server host="b"/><backup host="c"/></servers>
               </configuration>"#,
        )
        .expect("parse");
        let rules = ShapeRule::defaults();

        let results = ElementResolver::new(&rules).resolve(&root);

        assert_eq!(
            entries(&results),
            vec![
                ("servers:backup:host", "c"),
                ("servers:server:0:host", "a"),
                ("servers:server:1:host", "b"),
            ]
        );
    }

    #[test]
    fn root_attributes_are_ignored_and_rule_entries_override_attributes() {
        let root = parse_str(
            r#"<configuration version="2">
                 <feature enabled="false" A="attr">
                   <add key="A" value="rule"/>
                 </feature>
               </configuration>"#,
        )
        .expect("parse");
        let rules = ShapeRule::defaults();

        let results = ElementResolver::new(&rules).resolve(&root);

        assert_eq!(
            entries(&results),
            vec![("feature:A", "rule"), ("feature:enabled", "false")]
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let root = parse_str(
            r#"<configuration>
                 <connectionStrings>
                   <add name="Main" connectionString="Server=db" />
                 </connectionStrings>
               </configuration>"#,
        )
        .expect("parse");
        let rules = vec![
            ShapeRule::with_attributes("name", "value"),
            ShapeRule::with_attributes("name", "connectionString"),
        ];

        let results = ElementResolver::new(&rules).resolve(&root);

        assert_eq!(
            entries(&results),
            vec![("connectionStrings:Main:connectionString", "Server=db")]
        );
    }

    #[test]
    fn unrecognized_shape_falls_back_to_generic_recursion() {
        let root = parse_str(
            r#"<configuration><appSettings><add value="1"/></appSettings></configuration>"#,
        )
        .expect("parse");
        let rules = ShapeRule::defaults();

        let results = ElementResolver::new(&rules).resolve(&root);

        assert_eq!(entries(&results), vec![("appSettings:add:value", "1")]);
    }

    #[test]
    fn bare_elements_contribute_nothing() {
        let root = parse_str("<configuration><a/><b><c/></b></configuration>").expect("parse");
        let rules = ShapeRule::defaults();

        assert!(ElementResolver::new(&rules).resolve(&root).is_empty());
    }
}
