/// Unique submission identifier, as assigned by the competition platform.
/// Example: `1953`
pub type SubmissionId = String;
/// Image reference relative to the image root.
/// Example: `rumsey/test/5370006.png`
pub type ImageId = String;
/// Identifier for the platform account that uploaded a submission.
/// Example: `user_51343`
pub type UserId = String;
/// Display name of the team behind a platform account (may be empty).
/// Example: `Map Readers`
pub type TeamName = String;
