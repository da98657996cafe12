use crate::schema::HealthRes;

/// Health service shared by every HTTP surface of the front end.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Reports liveness of the front end only. The synthesis service is not probed.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "AstroLogic is alive".into(),
        }
    }
}
