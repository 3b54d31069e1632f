//! A minimal content tree and the math-rendering traversal over it

use super::options::RenderOptions;
use super::render::{render_math_in_text, Fragment, MathRenderer, RenderedMath};
use crate::features::macros::MacroTable;
use crate::utils::error::RenderError;

/// A node of a content tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<M = RenderedMath> {
    Text(String),
    Element(Element<M>),
    /// Rendered math, produced by the traversal
    Math(M),
}

impl<M> From<Fragment<M>> for Node<M> {
    fn from(fragment: Fragment<M>) -> Self {
        match fragment {
            Fragment::Text(text) => Node::Text(text),
            Fragment::Math(math) => Node::Math(math),
        }
    }
}

/// An element with a tag name, classes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<M = RenderedMath> {
    pub tag: String,
    pub classes: Vec<String>,
    pub children: Vec<Node<M>>,
}

impl<M> Element<M> {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element<M>) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    fn is_skipped(&self, options: &RenderOptions) -> bool {
        options.is_ignored_tag(&self.tag) || self.classes.iter().any(|c| options.is_ignored_class(c))
    }
}

/// Render math in every text node under `root`.
///
/// One macro table, seeded from `options`, is shared by the whole pass.
/// Elements with an ignored tag or class are left alone, as is `root`'s own
/// tag.
pub fn render_math_in_element<R>(
    root: &mut Element<R::Output>,
    options: &RenderOptions,
    renderer: &R,
) -> Result<(), RenderError>
where
    R: MathRenderer + ?Sized,
{
    let mut macros = options.macro_table();
    render_children(root, options, &mut macros, renderer)
}

fn render_children<R>(
    element: &mut Element<R::Output>,
    options: &RenderOptions,
    macros: &mut MacroTable,
    renderer: &R,
) -> Result<(), RenderError>
where
    R: MathRenderer + ?Sized,
{
    let mut index = 0;
    while index < element.children.len() {
        let fragments = match &mut element.children[index] {
            Node::Text(text) => render_math_in_text(text, options, macros, renderer)?,
            Node::Element(child) => {
                if !child.is_skipped(options) {
                    render_children(child, options, macros, renderer)?;
                }
                None
            }
            Node::Math(_) => None,
        };

        match fragments {
            Some(fragments) => {
                let count = fragments.len();
                element
                    .children
                    .splice(index..index + 1, fragments.into_iter().map(Node::from));
                index += count;
            }
            None => index += 1,
        }
    }
    Ok(())
}
