//! Route service - Plans a route and decodes its geometry

use std::{fmt, sync::Arc};

use domain::{BoundingRegion, DomainError, Route, RouteMode, RouteQuery};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    normalization::{check_upstream_status, decode_polyline, extract_polyline, validate_lat_lng},
    ports::RoutePlannerPort,
};

/// Service turning user coordinates into decoded route geometry
pub struct RouteService {
    planner: Arc<dyn RoutePlannerPort>,
    region: BoundingRegion,
}

impl fmt::Debug for RouteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteService")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl RouteService {
    /// Create a route service for the Quzhou region
    pub fn new(planner: Arc<dyn RoutePlannerPort>) -> Self {
        Self::with_region(planner, BoundingRegion::QUZHOU)
    }

    /// Create a route service that accepts coordinates inside `region`
    pub fn with_region(planner: Arc<dyn RoutePlannerPort>, region: BoundingRegion) -> Self {
        Self { planner, region }
    }

    /// The region user coordinates must fall into
    pub const fn region(&self) -> &BoundingRegion {
        &self.region
    }

    /// Plan a route between two `"lat,lng"` points
    ///
    /// `mode` is matched case-insensitively; absent or blank selects
    /// driving. The mode is checked first, then the origin, then the
    /// destination, and the provider is only called when all three pass.
    #[instrument(skip(self))]
    pub async fn plan_route(
        &self,
        origin: &str,
        destination: &str,
        mode: Option<&str>,
    ) -> Result<Route, ApplicationError> {
        let mode = RouteMode::parse_or_default(mode)?;
        let origin = validate_lat_lng(origin, &self.region)?;
        let destination = validate_lat_lng(destination, &self.region)?;
        let query = RouteQuery::new(origin, destination, mode);

        let response = self.planner.fetch_route(&query).await?;

        if let Err(e) = check_upstream_status(&response) {
            warn!(error = %e, "Routing provider reported a failure");
            return Err(e.into());
        }

        let polyline = extract_polyline(&response, mode);
        if polyline.is_empty() {
            debug!(%mode, "No geometry in provider response");
            return Err(DomainError::EmptyRoute.into());
        }

        let points = decode_polyline(&polyline)?;
        if points.is_empty() {
            return Err(DomainError::EmptyRoute.into());
        }

        debug!(%mode, points = points.len(), "Route decoded");
        Ok(Route::new(mode, points))
    }
}
