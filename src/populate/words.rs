/// Names handed out by the populator.
pub(crate) const WORDS: &[&str] = &[
    "alpha", "amber", "anchor", "apple", "archive", "arrow", "atlas", "autumn", "badge", "banner",
    "basin", "beacon", "birch", "bloom", "border", "branch", "breeze", "bridge", "cabin", "canyon",
    "carbon", "castle", "cedar", "chalk", "channel", "cherry", "cinder", "circle", "cliff", "cloud",
    "comet", "copper", "coral", "cotton", "crane", "crystal", "delta", "desert", "ember", "falcon",
    "fern", "field", "flint", "forest", "fossil", "garden", "glacier", "granite", "harbor", "hazel",
    "horizon", "island", "ivory", "jasper", "juniper", "kettle", "lagoon", "lantern", "ledger", "lemon",
    "maple", "marble", "meadow", "mirror", "mosaic", "nectar", "noble", "oasis", "orbit", "orchard",
    "pebble", "pepper", "pillar", "plume", "prairie", "quartz", "quill", "raven", "ribbon", "river",
    "saddle", "salt", "sierra", "signal", "spruce", "summit", "thistle", "timber", "tundra", "valley",
    "velvet", "walnut", "willow", "winter", "yarrow", "zephyr",
];
