//! Fixed text surrounding the generated fragments

/// GPL banner and the autogenerated notice for C++ outputs
pub fn license(year: i32, source_name: &str) -> String {
    format!(
        "/*
 * Copyright (C) 2008-{year} TrinityCore <http://www.trinitycore.org/>
 *
 * This program is free software; you can redistribute it and/or modify it
 * under the terms of the GNU General Public License as published by the
 * Free Software Foundation; either version 2 of the License, or (at your
 * option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT
 * ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
 * FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for
 * more details.
 *
 * You should have received a copy of the GNU General Public License along
 * with this program. If not, see <http://www.gnu.org/licenses/>.
 */

// DO NOT EDIT!
// Autogenerated from {source_name}

"
    )
}

/// Start of HotfixDatabase.cpp, up to the opening of `DoPrepareStatements`
pub fn statements_cpp_open(with_max_id: bool) -> String {
    let locale_offset = if with_max_id { 2 } else { 1 };
    let mut text = String::from("#include \"HotfixDatabase.h\"\n\n");

    if with_max_id {
        text.push_str(
            "// Force max id statements to appear exactly right after normal data fetch statement
#define PREPARE_MAX_ID_STMT(stmtBase, sql, con) \\
    static_assert(stmtBase + 1 == stmtBase##_MAX_ID, \"Invalid prepared statement index for \" #stmtBase \"_MAX_ID\"); \\
    PrepareStatement(stmtBase##_MAX_ID, sql, con);

",
        );
    }

    text.push_str(&format!(
        "// Force locale statments to appear exactly in locale declaration order, right after normal data fetch statement
#define PREPARE_LOCALE_STMT(stmtBase, sql, con) \\
    static_assert(stmtBase + {locale_offset} == stmtBase##_LOCALE, \"Invalid prepared statement index for \" #stmtBase \"_LOCALE\"); \\
    PrepareStatement(stmtBase##_LOCALE, sql, con);

void HotfixDatabaseConnection::DoPrepareStatements()
{{
    if (!m_reconnecting)
        m_stmts.resize(MAX_HOTFIXDATABASE_STATEMENTS);
"
    ));

    text
}

pub const STATEMENTS_CPP_CLOSE: &str = "}\n";

pub const STATEMENTS_H_OPEN: &str = "#ifndef _HOTFIXDATABASE_H
#define _HOTFIXDATABASE_H

#include \"DatabaseWorkerPool.h\"
#include \"MySQLConnection.h\"

enum HotfixDatabaseStatements
{
    /*  Naming standard for defines:
        {DB}_{SEL/INS/UPD/DEL/REP}_{Summary of data changed}
        When updating more than one field, consider looking at the calling function
        name for a suiting suffix.
    */
";

pub const STATEMENTS_H_CLOSE: &str = "
    MAX_HOTFIXDATABASE_STATEMENTS
};

class TC_DATABASE_API HotfixDatabaseConnection : public MySQLConnection
{
public:
    typedef HotfixDatabaseStatements Statements;

    //- Constructors for sync and async connections
    HotfixDatabaseConnection(MySQLConnectionInfo& connInfo) : MySQLConnection(connInfo) { }
    HotfixDatabaseConnection(ProducerConsumerQueue<SQLOperation*>* q, MySQLConnectionInfo& connInfo) : MySQLConnection(q, connInfo) { }

    //- Loads database type specific prepared statements
    void DoPrepareStatements() override;
};

typedef DatabaseWorkerPool<HotfixDatabaseConnection> HotfixDatabaseWorkerPool;

#endif
";

pub const LOAD_INFO_OPEN: &str = "#ifndef DB2LoadInfo_h__
#define DB2LoadInfo_h__

#include \"DB2DatabaseLoader.h\"
#include \"DB2Metadata.h\"
";

pub const LOAD_INFO_CLOSE: &str = "
#endif // DB2LoadInfo_h__
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_mentions_source_and_year() {
        let text = license(2026, "DB2Structure.h");
        assert!(text.contains("2008-2026"));
        assert!(text.contains("// Autogenerated from DB2Structure.h"));
    }

    #[test]
    fn test_locale_offset_follows_max_id() {
        assert!(statements_cpp_open(false).contains("stmtBase + 1 == stmtBase##_LOCALE"));
        assert!(!statements_cpp_open(false).contains("PREPARE_MAX_ID_STMT"));

        let with_max_id = statements_cpp_open(true);
        assert!(with_max_id.contains("stmtBase + 1 == stmtBase##_MAX_ID"));
        assert!(with_max_id.contains("stmtBase + 2 == stmtBase##_LOCALE"));
    }
}
