/// Number of keypoints in the COCO body layout (MoveNet, YOLO-pose).
pub const KEYPOINT_COUNT: usize = 17;

/// COCO keypoint names in model output order.
pub const KEYPOINT_NAMES: [&str; KEYPOINT_COUNT] = [
    "nose",
    "left_eye",
    "right_eye",
    "left_ear",
    "right_ear",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
];

/// Pairs of keypoint indices joined by a limb.
pub const SKELETON: [[usize; 2]; 19] = [
    [15, 13], // left ankle to left knee
    [13, 11], // left knee to left hip
    [16, 14], // right ankle to right knee
    [14, 12], // right knee to right hip
    [11, 12], // left hip to right hip
    [5, 11],  // left shoulder to left hip
    [6, 12],  // right shoulder to right hip
    [5, 6],   // left shoulder to right shoulder
    [5, 7],   // left shoulder to left elbow
    [6, 8],   // right shoulder to right elbow
    [7, 9],   // left elbow to left wrist
    [8, 10],  // right elbow to right wrist
    [1, 2],   // left eye to right eye
    [0, 1],   // nose to left eye
    [0, 2],   // nose to right eye
    [1, 3],   // left eye to left ear
    [2, 4],   // right eye to right ear
    [3, 5],   // left ear to left shoulder
    [4, 6],   // right ear to right shoulder
];

/// Limb palette: legs orange, torso purple, arms blue, face green.
pub const LIMB_COLORS: [[u8; 3]; 19] = [
    LEG, LEG, LEG, LEG, TORSO, TORSO, TORSO, ARM, ARM, ARM, ARM, ARM, FACE, FACE, FACE, FACE,
    FACE, FACE, FACE,
];

/// Keypoint palette, same grouping as the limbs.
pub const KEYPOINT_COLORS: [[u8; 3]; KEYPOINT_COUNT] = [
    FACE, FACE, FACE, FACE, FACE, ARM, ARM, ARM, ARM, ARM, ARM, LEG, LEG, LEG, LEG, LEG, LEG,
];

const LEG: [u8; 3] = [255, 128, 0];
const TORSO: [u8; 3] = [255, 51, 255];
const ARM: [u8; 3] = [51, 153, 255];
const FACE: [u8; 3] = [0, 255, 0];
