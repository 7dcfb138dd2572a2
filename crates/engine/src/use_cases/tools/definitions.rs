//! Tool definition builder for LLM function calling.
//!
//! Declares the four catalogue tools advertised to the model. Every
//! category parameter carries an explicit enum of the only legal values,
//! sourced from the static slug tables.

use crate::infrastructure::ports::ToolDefinition;
use nerdbot_domain::slugs;
use serde_json::json;

/// Build all tool definitions advertised to the model.
pub fn build_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        build_get_current_date_tool(),
        build_find_game_by_name_tool(),
        build_get_game_description_tool(),
        build_find_multiple_games_tool(),
    ]
}

fn build_get_current_date_tool() -> ToolDefinition {
    ToolDefinition {
        name: "get_current_date".to_string(),
        description: "Get the current date in the format YYYY-MM-DD. Use this when you need to calculate date ranges for filtering games by relative dates (e.g., 'games from last year', 'games released in the past 6 months').".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {}
        }),
    }
}

fn build_find_game_by_name_tool() -> ToolDefinition {
    ToolDefinition {
        name: "find_game_by_name".to_string(),
        description: "Search for a specific game by name and fetch its metadata (title, release date, rating, platforms, etc.). Use this when the user asks about a particular game by name and you need current data about it.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "game_name": {
                    "type": "string",
                    "description": "Exact or partial game title to search for. The game returned will be the one whose name/title best matches this value."
                }
            },
            "required": ["game_name"]
        }),
    }
}

fn build_get_game_description_tool() -> ToolDefinition {
    ToolDefinition {
        name: "get_game_description".to_string(),
        description: "Fetch the full text description of a game by its catalogue ID. Use this after a search has surfaced a game ID and the user wants to know what the game is actually about.".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "game_id": {
                    "type": "integer",
                    "description": "The catalogue ID of the game, as returned by a previous search."
                }
            },
            "required": ["game_id"]
        }),
    }
}

fn build_find_multiple_games_tool() -> ToolDefinition {
    ToolDefinition {
        name: "find_multiple_games".to_string(),
        description: "Search for multiple games using various filters (platform, genre, tags, ratings, release dates, etc.). Use this when the user explicitly asks for game recommendations or lists matching specific criteria (e.g., 'best PS4 games', 'top-rated RPGs', 'indie games from 2023').".to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "num_results": {
                    "type": "integer",
                    "description": "Maximum number of games to return. Default 5.",
                    "minimum": 1,
                    "maximum": 25
                },
                "title": {
                    "type": "string",
                    "description": "Filters results to games with a title that contain or closely matches this value."
                },
                "parent_platforms": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": slugs::slugs_of(slugs::PARENT_PLATFORM_SLUG_TO_ID)
                    },
                    "description": "Filters results to games that can be played on at least one of the provided parent platforms."
                },
                "platforms": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": slugs::slugs_of(slugs::PLATFORM_SLUG_TO_ID)
                    },
                    "description": "Filters results to games that can be played on at least one of the provided platforms."
                },
                "stores": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": slugs::slugs_of(slugs::STORE_SLUG_TO_ID)
                    },
                    "description": "Filters results to games that are available for purchase from at least one of the provided stores."
                },
                "developers": {
                    "type": "array",
                    "items": {"type": "string", "enum": slugs::DEVELOPER_SLUGS},
                    "description": "Filters results to games that were developed by at least one of the provided developers."
                },
                "publishers": {
                    "type": "array",
                    "items": {"type": "string", "enum": slugs::PUBLISHER_SLUGS},
                    "description": "Filters results to games that were published by at least one of the provided publishers."
                },
                "genres": {
                    "type": "array",
                    "items": {"type": "string", "enum": slugs::GENRE_SLUGS},
                    "description": "Filters results to games that fall into at least one of the provided genres."
                },
                "tags": {
                    "type": "array",
                    "items": {"type": "string", "enum": slugs::TAG_SLUGS},
                    "description": "Filters results to games that contain at least one of the provided tags."
                },
                "release_date_lower_bound": {
                    "type": "string",
                    "format": "date",
                    "description": "Filters results to games that were released on or AFTER this date. Only provide if you need games explicitly released AFTER a certain date (ex. \"show me games released 6 months ago\", \"show me games released in the 80s\")."
                },
                "release_date_upper_bound": {
                    "type": "string",
                    "format": "date",
                    "description": "Filters results to games that were released on or BEFORE this date. Only provide if you need games explicitly released BEFORE a certain date (ex. \"show me games released last year\", \"show me games released in the 2000s\")."
                },
                "metacritic_lower_bound": {
                    "type": "integer",
                    "description": "Filters results to games that have a metacritic score of AT LEAST this value. Only provide if you explicitly need games with higher metacritic scores than a certain value.",
                    "minimum": 0,
                    "maximum": 100
                },
                "metacritic_upper_bound": {
                    "type": "integer",
                    "description": "Filters results to games that have a metacritic score of AT MOST this value. Only provide if you explicitly need games with lower metacritic scores than a certain value.",
                    "minimum": 0,
                    "maximum": 100
                },
                "ordering": {
                    "type": "string",
                    "enum": slugs::ORDERINGS,
                    "description": "What attribute to sort the resulting list of games by. Values prefixed with '-' are sorted in descending order. Otherwise it is ascending order."
                }
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_all_tools() {
        let tools = build_tool_definitions();
        assert_eq!(tools.len(), 4);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert!(names.contains(&"get_current_date"));
        assert!(names.contains(&"find_game_by_name"));
        assert!(names.contains(&"get_game_description"));
        assert!(names.contains(&"find_multiple_games"));
    }

    #[test]
    fn test_find_game_by_name_schema() {
        let tool = build_find_game_by_name_tool();
        let params = &tool.parameters;
        assert_eq!(params["type"], "object");
        assert!(params["properties"]["game_name"].is_object());
        assert!(params["required"]
            .as_array()
            .expect("required list")
            .contains(&json!("game_name")));
    }

    #[test]
    fn test_find_multiple_games_enums_come_from_slug_tables() {
        let tool = build_find_multiple_games_tool();
        let platform_enum = tool.parameters["properties"]["platforms"]["items"]["enum"]
            .as_array()
            .expect("platform enum");
        assert!(platform_enum.contains(&json!("playstation5")));
        assert_eq!(platform_enum.len(), slugs::PLATFORM_SLUG_TO_ID.len());

        let ordering_enum = tool.parameters["properties"]["ordering"]["enum"]
            .as_array()
            .expect("ordering enum");
        assert!(ordering_enum.contains(&json!("-metacritic")));
    }

    #[test]
    fn test_num_results_bounds() {
        let tool = build_find_multiple_games_tool();
        let num_results = &tool.parameters["properties"]["num_results"];
        assert_eq!(num_results["minimum"], 1);
        assert_eq!(num_results["maximum"], 25);
    }
}
