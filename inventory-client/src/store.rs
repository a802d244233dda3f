//! Product Store Controller
//!
//! Holds the product list last returned by the server and drives every
//! create/update/delete through the API. Mutations never patch the local
//! list: each successful one is followed by a full reload, so the list is
//! always whatever the server last said.
//!
//! Failures are caught here, logged, and turned into a single [`Notice`];
//! callers only see an [`ActionOutcome`].

use shared::{ProductFields, ProductRecord, ProductStats};

use crate::api::ProductApi;
use crate::http::{HttpClient, ImageUpload};
use crate::presenter::{Notice, Presenter};
use crate::session::EditSession;
use crate::snapshot::{Snapshot, SnapshotStorage};
use crate::{ClientConfig, ClientError};

/// How a user action ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Server accepted the request
    Done,
    /// Network or server failure, already reported
    Failed,
    /// User declined the confirmation, nothing was sent
    Declined,
    /// Fields failed local checks, nothing was sent
    Rejected,
}

impl ActionOutcome {
    pub fn is_done(&self) -> bool {
        matches!(self, ActionOutcome::Done)
    }
}

pub struct ProductStore<C, P> {
    api: ProductApi<C>,
    presenter: P,
    config: ClientConfig,
    snapshot: Option<SnapshotStorage>,
    products: Vec<ProductRecord>,
    session: EditSession,
}

impl<C: HttpClient, P: Presenter> ProductStore<C, P> {
    pub fn new(http: C, presenter: P, config: ClientConfig) -> Self {
        let snapshot = config.snapshot_path.clone().map(SnapshotStorage::new);
        Self {
            api: ProductApi::new(http),
            presenter,
            config,
            snapshot,
            products: Vec::new(),
            session: EditSession::Idle,
        }
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn session(&self) -> EditSession {
        self.session
    }

    pub fn api(&self) -> &ProductApi<C> {
        &self.api
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn find(&self, id: i64) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Count and total value of the loaded list
    pub fn stats(&self) -> ProductStats {
        ProductStats::from_records(&self.products)
    }

    /// Public URL of a record's image
    pub fn image_url(&self, record: &ProductRecord) -> Option<String> {
        record
            .image
            .as_deref()
            .map(|filename| self.config.image_url(filename))
    }

    /// Replace the list with the server's, then re-render.
    ///
    /// On failure the previous list stays on screen. If nothing was loaded
    /// yet, the local snapshot (when configured) is shown instead.
    pub async fn load(&mut self) -> ActionOutcome {
        match self.api.list().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "Product list reloaded");
                self.products = products;
                self.write_snapshot();
                self.render_all();
                ActionOutcome::Done
            }
            Err(e) => {
                tracing::warn!(error = %e, "Product list reload failed, keeping previous list");
                if self.products.is_empty()
                    && let Some(snapshot) = self.snapshot.as_ref().and_then(SnapshotStorage::load)
                {
                    tracing::info!(
                        count = snapshot.products.len(),
                        "Showing products from local snapshot"
                    );
                    self.products = snapshot.products;
                }
                self.presenter.notify(Notice::warning(
                    "Could not reach the server. Showing the last loaded list.",
                ));
                self.render_all();
                ActionOutcome::Failed
            }
        }
    }

    /// POST a new product, then reload
    pub async fn create(
        &mut self,
        fields: &ProductFields,
        image: Option<ImageUpload>,
    ) -> ActionOutcome {
        match self.prepare(fields) {
            Some(fields) => self.send_create(&fields, image).await,
            None => ActionOutcome::Rejected,
        }
    }

    /// PUT an existing product, then reload
    pub async fn update(
        &mut self,
        id: i64,
        fields: &ProductFields,
        image: Option<ImageUpload>,
    ) -> ActionOutcome {
        match self.prepare(fields) {
            Some(fields) => self.send_update(id, &fields, image).await,
            None => ActionOutcome::Rejected,
        }
    }

    /// DELETE a product after the user confirms, then reload
    pub async fn remove(&mut self, id: i64) -> ActionOutcome {
        let prompt = match self.find(id) {
            Some(product) => format!("Delete \"{}\" (#{})?", product.name, id),
            None => format!("Delete product #{}?", id),
        };
        if !self.presenter.confirm(&prompt) {
            tracing::debug!(id, "Delete declined");
            return ActionOutcome::Declined;
        }

        match self.api.delete(id).await {
            Ok(_) => {
                tracing::info!(id, "Product deleted");
                if self.session.target() == Some(id) {
                    self.session.reset();
                }
                self.load().await;
                self.presenter
                    .notify(Notice::success("Product deleted successfully"));
                ActionOutcome::Done
            }
            Err(e) => self.report("delete product", e),
        }
    }

    /// Rows whose name or description contain `term`, ignoring case.
    ///
    /// Renders the filtered rows; the stored list is untouched.
    pub fn search(&mut self, term: &str) -> Vec<ProductRecord> {
        let term = term.to_lowercase();
        let rows: Vec<ProductRecord> = self
            .products
            .iter()
            .filter(|p| p.matches_lowercase(&term))
            .cloned()
            .collect();
        let stats = self.stats();
        self.presenter.render(&rows, &stats);
        rows
    }

    /// Target a loaded record with the next submit.
    ///
    /// Unknown ids leave the session as it was.
    pub fn edit(&mut self, id: i64) -> Option<&ProductRecord> {
        let index = self.products.iter().position(|p| p.id == id)?;
        self.session.begin(id);
        self.products.get(index)
    }

    pub fn cancel(&mut self) {
        self.session.reset();
    }

    /// Create or update depending on the session, then return to `Idle`.
    ///
    /// Fields rejected by local checks keep the session as it was.
    pub async fn submit(
        &mut self,
        fields: &ProductFields,
        image: Option<ImageUpload>,
    ) -> ActionOutcome {
        let Some(fields) = self.prepare(fields) else {
            return ActionOutcome::Rejected;
        };
        match self.session.reset() {
            Some(id) => self.send_update(id, &fields, image).await,
            None => self.send_create(&fields, image).await,
        }
    }

    async fn send_create(
        &mut self,
        fields: &ProductFields,
        image: Option<ImageUpload>,
    ) -> ActionOutcome {
        match self.api.create(fields, image).await {
            Ok(created) => {
                tracing::info!(id = created.id, name = %created.name, "Product created");
                self.load().await;
                self.presenter
                    .notify(Notice::success("Product added successfully"));
                ActionOutcome::Done
            }
            Err(e) => self.report("add product", e),
        }
    }

    async fn send_update(
        &mut self,
        id: i64,
        fields: &ProductFields,
        image: Option<ImageUpload>,
    ) -> ActionOutcome {
        if self.find(id).is_none() {
            tracing::warn!(id, "Updating a product that is not in the loaded list");
        }
        match self.api.update(id, fields, image).await {
            Ok(updated) => {
                tracing::info!(id = updated.id, "Product updated");
                self.load().await;
                self.presenter
                    .notify(Notice::success("Product updated successfully"));
                ActionOutcome::Done
            }
            Err(e) => self.report("update product", e),
        }
    }

    /// Trimmed fields, or `None` after reporting why they were rejected
    fn prepare(&mut self, fields: &ProductFields) -> Option<ProductFields> {
        let fields = fields.normalized();
        match fields.validate().map_err(ClientError::from) {
            Ok(()) => Some(fields),
            Err(e) => {
                tracing::debug!(error = %e, kind = ?e.kind(), "Submission rejected locally");
                self.presenter.notify(Notice::error(e.to_string()));
                None
            }
        }
    }

    fn report(&mut self, action: &str, e: ClientError) -> ActionOutcome {
        tracing::error!(error = %e, kind = ?e.kind(), "Failed to {}", action);
        self.presenter
            .notify(Notice::error(format!("Could not {}: {}", action, e)));
        ActionOutcome::Failed
    }

    fn render_all(&mut self) {
        let stats = self.stats();
        self.presenter.render(&self.products, &stats);
    }

    fn write_snapshot(&self) {
        if let Some(storage) = &self.snapshot
            && let Err(e) = storage.save(&Snapshot::new(self.products.clone()))
        {
            tracing::warn!(path = %storage.path().display(), error = %e, "Failed to write local snapshot");
        }
    }
}
