use trading_pack_core::ApiContext;

use crate::category::CategoryTree;
use crate::error::PackError;
use crate::response::RawResponse;
use crate::transport::{CallParams, FieldHints, TradingCall};

pub const LEVEL_LIMIT_DEFAULT: u32 = 5;

const FAILURE_SUMMARY: &str = "Unable to obtain category information!";

/// Category hierarchy below `root`, or the top-level categories of the site
/// when there is no root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCategories {
    root: Option<i64>,
    level_limit: u32,
    extra_hints: FieldHints,
}

impl GetCategories {
    /// A non-positive root is treated as no root.
    #[must_use]
    pub fn new(root: Option<i64>) -> Self {
        let root = root.filter(|id| *id > 0);
        Self {
            root,
            level_limit: if root.is_some() { LEVEL_LIMIT_DEFAULT } else { 1 },
            extra_hints: FieldHints::default(),
        }
    }

    /// Depth of the returned hierarchy. Ignored without a root, where only
    /// the top level is requested.
    #[must_use]
    pub fn with_level_limit(mut self, level_limit: u32) -> Self {
        if self.root.is_some() {
            self.level_limit = level_limit.max(1);
        }
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: FieldHints) -> Self {
        self.extra_hints = hints;
        self
    }

    #[must_use]
    pub fn root(&self) -> Option<i64> {
        self.root
    }

    #[must_use]
    pub fn level_limit(&self) -> u32 {
        self.level_limit
    }
}

impl TradingCall for GetCategories {
    const NAME: &'static str = "GetCategories";
    type Output = CategoriesResponse;

    fn params(&self, context: &ApiContext) -> CallParams {
        CallParams::new()
            .field("CategorySiteID", context.site_id)
            .field_opt("CategoryParent", self.root)
            .field("DetailLevel", "ReturnAll")
            .field("LevelLimit", self.level_limit)
            .field("ViewAllNodes", "true")
    }

    fn field_hints(&self) -> FieldHints {
        FieldHints::new()
            .with_known_arrays(["category"])
            .merged(&self.extra_hints)
    }

    fn finish(self, response: RawResponse) -> CategoriesResponse {
        let tree = CategoryTree::from_response(response.tree());
        CategoriesResponse {
            request: self,
            response,
            tree,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CategoriesResponse {
    request: GetCategories,
    response: RawResponse,
    tree: CategoryTree,
}

impl CategoriesResponse {
    #[must_use]
    pub fn request(&self) -> &GetCategories {
        &self.request
    }

    #[must_use]
    pub fn response(&self) -> &RawResponse {
        &self.response
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response.is_success()
    }

    #[must_use]
    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    /// Indented category listing; see [`CategoryTree::render`].
    ///
    /// # Errors
    ///
    /// Returns [`PackError::RemoteCall`] if the call was not successful.
    pub fn render(&self) -> Result<String, PackError> {
        self.ensure_success()?;
        Ok(self.tree.render(self.request.root))
    }

    /// The whole response tree as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::RemoteCall`] if the call was not successful, or
    /// [`PackError::Yaml`] if serialisation fails.
    pub fn to_yaml(&self) -> Result<String, PackError> {
        self.ensure_success()?;
        serde_yaml::to_string(self.response.tree()).map_err(|source| PackError::Yaml {
            context: format!("{} response", GetCategories::NAME),
            source,
        })
    }

    fn ensure_success(&self) -> Result<(), PackError> {
        if self.response.is_success() {
            Ok(())
        } else {
            Err(self
                .response
                .remote_call_error(GetCategories::NAME, FAILURE_SUMMARY))
        }
    }
}
