pub const CONTAINER_LG: &str = "max-w-6xl mx-auto px-4 sm:px-6 lg:px-8 py-6";
pub const NAV: &str = "fixed top-0 z-30 w-full bg-white/60 dark:bg-gray-700/60 backdrop-blur-md border-b border-gray-200/50 dark:border-gray-700/50";
pub const NAV_INNER: &str = "w-full h-16 px-4 sm:px-6 lg:px-8";
pub const NAV_CONTENT: &str = "h-full flex items-center justify-between";
pub const NAV_BRAND: &str = "flex items-center text-xl font-bold text-gray-900 dark:text-white hover:text-emerald-500 dark:hover:text-emerald-400 transition-colors duration-200";
pub const NAV_ITEMS: &str = "flex items-center space-x-4";
pub const BUTTON_ICON: &str = "p-2 text-gray-800 dark:text-white hover:text-blue-600 dark:hover:text-blue-400 rounded-lg transition-colors duration-200";
pub const BALANCE_PILL: &str = "flex items-center space-x-1 px-3 py-1 bg-gray-100 dark:bg-gray-700 rounded-lg text-sm font-medium text-emerald-700 dark:text-emerald-300";

pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] p-6";
pub const CARD_TITLE: &str = "text-lg font-semibold text-gray-900 dark:text-white";
pub const CARD_TEXT: &str = "text-sm text-gray-600 dark:text-gray-400";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 shadow-lg hover:shadow-xl transition-all duration-300";
pub const BUTTON_SECONDARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white hover:bg-gray-50 dark:hover:bg-gray-800";

pub const TEXT_H1: &str = "text-3xl font-bold text-gray-900 dark:text-white";
pub const TEXT_H2: &str = "text-2xl font-bold text-gray-900 dark:text-white";
pub const TEXT_BODY: &str = "text-gray-600 dark:text-gray-300";
pub const TEXT_SMALL: &str = "text-sm text-gray-500 dark:text-gray-400";
pub const TEXT_ERROR: &str = "text-sm text-red-500 dark:text-red-400";
pub const TEXT_HINT: &str = "text-xs text-gray-500 dark:text-gray-400 mt-1";
pub const FLEX_CENTER: &str = "flex min-h-[80vh] flex-col justify-center px-6 py-12 lg:px-8";
pub const ALERT_ERROR: &str = "bg-red-50 dark:bg-red-900/50 border border-red-200 dark:border-red-800 rounded-lg p-4 text-red-700 dark:text-red-200 text-center";
pub const ALERT_WARNING: &str = "p-4 text-sm text-yellow-800 rounded-lg bg-yellow-50 dark:bg-gray-900 dark:text-yellow-400 text-center";
pub const LOADING_SPINNER: &str = "animate-spin h-5 w-5 rounded-full border-2 border-blue-600 border-t-transparent dark:border-blue-400 dark:border-t-transparent";

// Gacha machine
pub const TIER_BUTTON: &str = "flex flex-col items-center gap-1 p-3 rounded-xl border-2 bg-white dark:bg-gray-800 transition-all duration-200 hover:-translate-y-0.5";
pub const TIER_BUTTON_SELECTED: &str = "ring-4 ring-offset-2 ring-emerald-400 dark:ring-offset-gray-900 scale-105";
pub const FREE_ROLL_BADGE: &str = "px-2 py-0.5 rounded-full text-[10px] font-bold uppercase bg-emerald-100 text-emerald-700 dark:bg-emerald-900/40 dark:text-emerald-300";
pub const REEL_WINDOW: &str = "relative overflow-hidden rounded-lg bg-gray-100 dark:bg-gray-900 border border-gray-200 dark:border-gray-700";
pub const REEL_PAY_LINE: &str = "pointer-events-none absolute inset-x-0 border-y-2 border-amber-400/80 bg-amber-300/10";
pub const ROLL_BUTTON: &str = "w-full max-w-[300px] py-4 px-8 rounded-full text-lg font-bold text-white bg-gradient-to-r from-purple-600 to-emerald-500 shadow-lg hover:shadow-xl transition-all duration-300";
pub const REWARD_CARD: &str = "flex flex-col items-center w-80 p-8 rounded-2xl border-4 bg-white dark:bg-gray-900 text-center";
pub const LINK_CODE: &str = "block mx-auto mb-2 w-fit px-4 py-2 rounded-lg font-mono text-2xl tracking-widest bg-gray-900 text-emerald-400";
