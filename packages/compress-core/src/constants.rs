/// デフォルトの最大幅（px）
pub const DEFAULT_MAX_WIDTH: u32 = 2048;

/// デフォルトの最大高さ（px）
pub const DEFAULT_MAX_HEIGHT: u32 = 2048;

/// デフォルトの初期品質（0.0 < q <= 1.0）
pub const DEFAULT_QUALITY: f32 = 0.85;

/// デフォルトの目標サイズ（KB）
pub const DEFAULT_MAX_SIZE_KB: u64 = 1024;

/// 入力ファイルの絶対上限（20MB、目標サイズとは独立）
pub const MAX_INPUT_BYTES: u64 = 20 * 1024 * 1024;

/// デコード後の最大ピクセル数（極端な入力によるメモリ枯渇のみ防止）
pub const MAX_PIXELS: u64 = 200_000_000;

/// エンコード試行回数の上限
pub const MAX_ATTEMPTS: u32 = 5;

/// 試行ごとに下げる品質の幅
pub const QUALITY_STEP: f32 = 0.1;

/// 品質の下限（これ以上は下げない）
pub const QUALITY_FLOOR: f32 = 0.5;
