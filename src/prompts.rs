/// Instruction sent with every try-on submission. The model receives the
/// person photo first and the garment image second.
pub const VIRTUAL_TRYON: &str = "Virtual try-on: replace the clothing on the person \
with the clothing from the second image while keeping the person's body pose, face, \
and background intact. Make it look natural and realistic.";

/// Shown when a try-on is triggered before a user photo has been saved.
pub const UPLOAD_PROMPT: &str = "Please upload your photo first in the extension popup!";
