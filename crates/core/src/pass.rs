//! One complete, single-threaded-by-default pass over a document.
//!
//! The stages run in a fixed order: resolve styles, resolve numbering, nest
//! the runs of every paragraph, classify paragraphs into list items, infer
//! lists, and strip the properties only inference needed. A fatal error at
//! any stage ends the pass with no output.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::paragraph::ParagraphClassifier;
use crate::records::{DocumentRecords, ParagraphRecord, to_properties};
use crate::{PassConfig, PassError};
use quire_idf::{BlockMeta, Node, StripEmptyBlocks, StripProperties, rewrite};
use quire_lists::{Item, ObservedCounter, infer};
use quire_nesting::{RangeSplit, Token, nest, trim_trailing_whitespace};
use quire_numbering::{NumberingCounterState, NumberingResolver, ResolvedNumbering};
use quire_style::{CascadeResolver, ResolvedStyles};

/// Everything a successful pass produces.
#[derive(Debug)]
pub struct PassOutput {
    pub nodes: Vec<Node>,
    pub styles: ResolvedStyles,
    pub numbering: ResolvedNumbering,
    /// Counter stacks as they stood after the last paragraph.
    pub counters: NumberingCounterState,
    pub counters_observed: Vec<ObservedCounter>,
    pub diagnostics: Diagnostics,
}

impl PassOutput {
    /// Serializes the output tree for a downstream serializer.
    pub fn nodes_to_json(&self) -> Result<String, PassError> {
        Ok(serde_json::to_string(&self.nodes)?)
    }
}

/// A paragraph after nesting and classification.
struct Prepared {
    index: usize,
    /// `None` for paragraphs without content.
    item: Option<Item>,
    splits: Vec<RangeSplit>,
}

pub struct DocumentPass<'a> {
    records: &'a DocumentRecords,
    config: &'a PassConfig,
}

impl<'a> DocumentPass<'a> {
    pub fn new(records: &'a DocumentRecords, config: &'a PassConfig) -> Self {
        Self { records, config }
    }

    pub fn run(&self) -> Result<PassOutput, PassError> {
        self.config.validate()?;

        let style_set = self.records.style_set()?;
        let styles = CascadeResolver::new(&style_set).resolve_all()?;

        let numbering_set = self.records.numbering_set()?;
        let numbering = NumberingResolver::new(&numbering_set, &styles).resolve_all()?;

        let classifier = ParagraphClassifier::new(&styles, &numbering, self.config);
        let prepared = self.prepare_all(&classifier)?;

        let mut diagnostics = Diagnostics::default();
        let mut items = Vec::with_capacity(prepared.len());
        for paragraph in prepared {
            diagnostics.extend(paragraph.splits.into_iter().map(|split| {
                Diagnostic::MalformedRange {
                    paragraph: paragraph.index,
                    split,
                }
            }));
            items.extend(paragraph.item);
        }

        let inferred = infer(items, &numbering, &self.config.lists);
        diagnostics.extend(
            inferred
                .diagnostics
                .into_iter()
                .map(Diagnostic::MarkerMismatch),
        );

        let strip = StripProperties::new(self.config.stripped_properties.iter().cloned());
        let nodes = rewrite(inferred.nodes, &strip);

        log::info!(
            "document pass complete: {} paragraphs, {} output nodes, {}",
            self.records.paragraphs.len(),
            nodes.len(),
            diagnostics.summary()
        );

        Ok(PassOutput {
            nodes,
            styles,
            numbering,
            counters: inferred.counters,
            counters_observed: inferred.counters_observed,
            diagnostics,
        })
    }

    #[cfg(feature = "parallel")]
    fn prepare_all(&self, classifier: &ParagraphClassifier<'_>) -> Result<Vec<Prepared>, PassError> {
        use rayon::prelude::*;

        self.records
            .paragraphs
            .par_iter()
            .enumerate()
            .map(|(index, paragraph)| self.prepare(classifier, index, paragraph))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn prepare_all(&self, classifier: &ParagraphClassifier<'_>) -> Result<Vec<Prepared>, PassError> {
        self.records
            .paragraphs
            .iter()
            .enumerate()
            .map(|(index, paragraph)| self.prepare(classifier, index, paragraph))
            .collect()
    }

    fn prepare(
        &self,
        classifier: &ParagraphClassifier<'_>,
        index: usize,
        paragraph: &ParagraphRecord,
    ) -> Result<Prepared, PassError> {
        let own = to_properties(&paragraph.declarations)?;
        let classification = classifier.classify(paragraph, &own)?;
        let paragraph_style = classifier
            .style_properties(paragraph.style.as_ref())?
            .without_numbering();

        let mut tokens = paragraph
            .runs
            .iter()
            .map(|run| -> Result<Token, PassError> {
                let properties = classifier.run_properties(&paragraph_style, run)?;
                Ok(Token::text(run.text.clone(), properties.without_numbering()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if self.config.trim_trailing_whitespace {
            trim_trailing_whitespace(&mut tokens);
        }

        let ambient = self.config.nesting.ambient_for(&paragraph_style, &tokens);
        let nested = nest(tokens, &ambient);
        let block = Node::block(
            BlockMeta::new(paragraph.style.clone(), classification.computed),
            nested.nodes,
        );

        let Some(content) = rewrite(vec![block], &StripEmptyBlocks).pop() else {
            log::debug!("paragraph {} has no content; dropped", index);
            return Ok(Prepared {
                index,
                item: None,
                splits: nested.splits,
            });
        };

        let (list_instance, level) = match classification.numbering {
            Some((instance, level)) => (Some(instance), Some(level)),
            None => (None, None),
        };
        let item = Item {
            list_instance,
            level,
            indentation: classification.indentation,
            is_recognized_list_marker: classification.is_list_item,
            literal_marker: paragraph.marker.clone(),
            keeps_lists_open: paragraph.keeps_lists_open,
            content,
        };
        Ok(Prepared {
            index,
            item: Some(item),
            splits: nested.splits,
        })
    }
}
