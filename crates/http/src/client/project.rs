//! Project client methods

use super::{Envelope, Gateway, GatewayError, RequestConfig};
use crate::types::{Page, Project, ProjectQuery};

impl Gateway {
    /// Page through the current user's projects
    pub async fn list_projects(
        &self,
        query: &ProjectQuery,
    ) -> Result<Envelope<Page<Project>>, GatewayError> {
        let mut request = RequestConfig::get("/project/list")
            .query("pageNum", query.page_num)
            .query("pageSize", query.page_size);
        if let Some(status) = &query.status {
            request = request.query("status", status);
        }
        self.call(request).await
    }

    /// A single project owned by the current user
    pub async fn project(&self, pid: &str) -> Result<Envelope<Project>, GatewayError> {
        self.call(RequestConfig::get(format!("/project/{pid}"))).await
    }
}
