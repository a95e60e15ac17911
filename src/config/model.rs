use std::collections::BTreeSet;

use crate::{
    animation::tween::Animator,
    foundation::{
        core::{LocalTransform, NodeId},
        error::{PageflowError, PageflowResult, ensure_seconds},
    },
    host::{NodeFactory, NodeHost},
    page::{PageDef, element::ElementDef, sequence::Order},
    stage::{DEFAULT_FIRST_PAGE_DELAY, Stage, StageSettings},
    transition::spec::{DeriveHide, TransitionSpec},
};

/// A whole stage: its pages, the page opened at start-up and stage-wide switches.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageConfig {
    pub pages: Vec<PageConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_page: Option<FirstPage>,
    #[serde(default)]
    pub log_requests: bool,
    #[serde(default = "yes")]
    pub record_events: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FirstPage {
    pub page: String,
    #[serde(default = "default_first_page_delay")]
    pub delay: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageConfig {
    pub name: String,
    /// Whether the stack controller knows the page.
    #[serde(default = "yes")]
    pub registered: bool,
    #[serde(default)]
    pub show_order: Order,
    #[serde(default)]
    pub hide_order: Order,
    #[serde(default = "yes")]
    pub deactivate_on_hide_finished: bool,
    #[serde(default = "yes")]
    pub hide_on_init: bool,
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementConfig {
    pub name: String,
    /// Resting transform of the element node; identity when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<LocalTransform>,
    #[serde(default)]
    pub show: Vec<TransitionSpec>,
    #[serde(default)]
    pub hide: Vec<TransitionSpec>,
    /// Build `hide` from `show` instead of listing it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derive_hide: Option<DeriveHide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_after_show: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_after_hide: Option<f64>,
}

fn yes() -> bool {
    true
}

fn default_first_page_delay() -> f64 {
    DEFAULT_FIRST_PAGE_DELAY
}

impl StageConfig {
    pub fn from_json_str(s: &str) -> PageflowResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> PageflowResult<()> {
        let mut names = BTreeSet::new();
        for page in &self.pages {
            if !names.insert(page.name.as_str()) {
                return Err(PageflowError::validation(format!(
                    "duplicate page name '{}'",
                    page.name
                )));
            }
            page.validate()?;
        }
        if let Some(first) = &self.first_page {
            if !names.contains(first.page.as_str()) {
                return Err(PageflowError::config(format!(
                    "first_page references unknown page '{}'",
                    first.page
                )));
            }
            ensure_seconds("first_page delay", first.delay)?;
        }
        Ok(())
    }

    /// Create one host node per page and per element, then build a stage over them.
    #[tracing::instrument(skip_all, fields(pages = self.pages.len()))]
    pub fn load<H, A>(&self, mut host: H, animator: A) -> PageflowResult<Stage<H, A>>
    where
        H: NodeHost + NodeFactory,
        A: Animator,
    {
        self.validate()?;

        let defs: Vec<(PageDef, bool)> = self
            .pages
            .iter()
            .map(|page| -> PageflowResult<(PageDef, bool)> {
                Ok((page.to_def(&mut host)?, page.registered))
            })
            .collect::<PageflowResult<_>>()?;

        let settings = StageSettings {
            log_requests: self.log_requests,
            record_events: self.record_events,
        };
        let mut stage = Stage::with_settings(host, animator, settings);
        for (def, registered) in defs {
            if registered {
                stage.add_page(def)?;
            } else {
                stage.add_unregistered_page(def)?;
            }
        }

        if let Some(first) = &self.first_page {
            let id = stage.page_id(&first.page).ok_or_else(|| {
                PageflowError::config(format!("unknown first page '{}'", first.page))
            })?;
            stage.set_first_page(id, first.delay)?;
        }
        tracing::debug!(pages = stage.pages().len(), "stage loaded");
        Ok(stage)
    }
}

impl PageConfig {
    pub fn validate(&self) -> PageflowResult<()> {
        if self.name.trim().is_empty() {
            return Err(PageflowError::validation("page name must be non-empty"));
        }
        let mut names = BTreeSet::new();
        for e in &self.elements {
            if !names.insert(e.name.as_str()) {
                return Err(PageflowError::validation(format!(
                    "page '{}' has two elements named '{}'",
                    self.name, e.name
                )));
            }
            let what = |field: &str| format!("element '{}/{}' {field}", self.name, e.name);
            if let Some(d) = e.delay_after_show {
                ensure_seconds(&what("delay_after_show"), d)?;
            }
            if let Some(d) = e.delay_after_hide {
                ensure_seconds(&what("delay_after_hide"), d)?;
            }
            if e.derive_hide.is_some() && !e.hide.is_empty() {
                return Err(PageflowError::validation(format!(
                    "element '{}/{}' sets both hide and derive_hide",
                    self.name, e.name
                )));
            }
        }
        Ok(())
    }

    fn to_def(&self, host: &mut impl NodeFactory) -> PageflowResult<PageDef> {
        let node = host.spawn_node(&self.name, None, LocalTransform::default());
        let mut def = PageDef::new(&self.name, node)
            .show_order(self.show_order)
            .hide_order(self.hide_order)
            .deactivate_on_hide_finished(self.deactivate_on_hide_finished)
            .hide_on_init(self.hide_on_init);
        for e in &self.elements {
            let element_node =
                host.spawn_node(&e.name, Some(node), e.transform.unwrap_or_default());
            def = def.element(e.to_def(element_node));
        }
        def.validate()?;
        Ok(def)
    }
}

impl ElementConfig {
    fn to_def(&self, node: NodeId) -> ElementDef {
        let hide = match self.derive_hide {
            Some(derive) => derive.apply(&self.show),
            None => self.hide.clone(),
        };
        ElementDef {
            name: self.name.clone(),
            node,
            show: self.show.clone(),
            hide,
            delay_after_show: self.delay_after_show,
            delay_after_hide: self.delay_after_hide,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
