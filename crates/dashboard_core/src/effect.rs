use std::time::Duration;

use crate::GenerationRequest;

/// Identifies one history read; later reads carry larger ids.
pub type RequestId = u64;
pub type SubmissionId = u64;
/// Identifies one success banner and the timer that clears it.
pub type BannerToken = u64;

/// How long a success banner stays visible once its submission settled.
pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the job history from the service.
    LoadHistory { request_id: RequestId },
    /// Send a generation request to the service.
    SubmitGeneration {
        submission_id: SubmissionId,
        request: GenerationRequest,
    },
    /// Report `Msg::SuccessBannerExpired { token }` once `after` has elapsed.
    ScheduleBannerClear { token: BannerToken, after: Duration },
    /// The banner for `token` was superseded; its timer must not fire.
    CancelBannerClear { token: BannerToken },
}
