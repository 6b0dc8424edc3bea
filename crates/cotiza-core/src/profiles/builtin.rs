use crate::error::CotizaError;
use crate::model::CompanyTag;
use crate::profiles::schema::VendorProfileDef;

const HDI_JSON: &str = include_str!("../../../../profiles/hdi.json");
const QUALITAS_JSON: &str = include_str!("../../../../profiles/qualitas.json");
const ANA_JSON: &str = include_str!("../../../../profiles/ana.json");
const ATLAS_JSON: &str = include_str!("../../../../profiles/atlas.json");

/// Load the built-in profile for an insurer.
pub fn load_builtin(company: CompanyTag) -> Result<VendorProfileDef, CotizaError> {
    let json = match company {
        CompanyTag::Hdi => HDI_JSON,
        CompanyTag::Qualitas => QUALITAS_JSON,
        CompanyTag::Ana => ANA_JSON,
        CompanyTag::Atlas => ATLAS_JSON,
        CompanyTag::Unknown => {
            return Err(CotizaError::ProfileInvalid(
                "there is no profile for unidentified documents".into(),
            ))
        }
    };
    let profile = crate::profiles::parse_profile_str(json)?;
    if profile.company != company {
        return Err(CotizaError::ProfileInvalid(format!(
            "built-in profile for '{}' declares company '{}'",
            company.key(),
            profile.company.key()
        )));
    }
    Ok(profile)
}

/// Load the built-in profiles of every known insurer.
pub fn load_all() -> Result<Vec<VendorProfileDef>, CotizaError> {
    CompanyTag::KNOWN.iter().map(|c| load_builtin(*c)).collect()
}
