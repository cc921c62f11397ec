//! Clinical safety guidelines embedded in every instruction preamble.

/// Guidelines every role is instructed to follow, in preamble order.
pub const SAFETY_GUIDELINES: [&str; 6] = [
    "Always acknowledge uncertainty when evidence is insufficient.",
    "Prioritize patient safety over diagnostic certainty.",
    "Flag any life-threatening conditions immediately.",
    "Base diagnoses only on provided symptoms and clinical evidence.",
    "Recommend appropriate diagnostic tests when needed.",
    "Consider differential diagnoses systematically.",
];
