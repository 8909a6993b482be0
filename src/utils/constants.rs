/// Report CSV column names
pub const COLUMN_STATION: &str = "CODST";
pub const COLUMN_DATE: &str = "DATCLIM";
pub const COLUMN_MIN_TEMP: &str = "TMIN";
pub const COLUMN_MEAN_TEMP: &str = "TMED";

/// File names
pub const DEFAULT_DATA_DIR: &str = "doc";
pub const FILE_LIST_FILE: &str = "file_list.csv";
pub const SETTINGS_FILE: &str = "clim-report";

/// Annual report files are named `{prefix}{YYYY}.csv`
pub const DEFAULT_REPORT_PREFIX: &str = "climrbsn";
pub const REPORT_MARKER: &str = "clim";
pub const REPORT_EXTENSION: &str = "csv";

/// Dataset page whose resource links point at every annual report
pub const DEFAULT_LISTING_URL: &str =
    "http://data.gov.ro/dataset/date-climatologice-de-la-cele-23-de-statii-esentiale-pentru-anul-2016";

/// Processing defaults
pub const DEFAULT_TOP_K: usize = 5;
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Environment variable prefix for settings
pub const ENV_PREFIX: &str = "CLIM_REPORT";
