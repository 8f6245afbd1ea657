//! Marketing page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Path,
    response::{IntoResponse, Redirect, Response},
};

use hydron_core::Region;

use crate::content::{self, BranchInfo, FaqItem, PricingTier};
use crate::error::AppError;
use crate::filters;
use crate::middleware::OptionalUser;

/// Home page template for a region.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub region: Region,
    pub branch: BranchInfo,
    pub tiers: Vec<PricingTier>,
    pub faq: &'static [FaqItem],
    pub signed_in: bool,
}

/// Pricing page template for a region.
#[derive(Template, WebTemplate)]
#[template(path = "pricing.html")]
pub struct PricingTemplate {
    pub region: Region,
    pub branch: BranchInfo,
    pub tiers: Vec<PricingTier>,
}

/// Root redirects to the UK branch.
pub async fn root() -> Redirect {
    Redirect::to("/uk")
}

/// Display a region's home page.
pub async fn region_home(
    Path(region): Path<String>,
    OptionalUser(user): OptionalUser,
) -> Result<Response, AppError> {
    let region = parse_region(&region)?;

    Ok(HomeTemplate {
        region,
        branch: content::branch(region),
        tiers: content::pricing(region),
        faq: content::faq(),
        signed_in: user.is_some(),
    }
    .into_response())
}

/// Display a region's pricing page.
pub async fn region_pricing(Path(region): Path<String>) -> Result<Response, AppError> {
    let region = parse_region(&region)?;

    Ok(PricingTemplate {
        region,
        branch: content::branch(region),
        tiers: content::pricing(region),
    }
    .into_response())
}

fn parse_region(raw: &str) -> Result<Region, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("region {raw}")))
}
