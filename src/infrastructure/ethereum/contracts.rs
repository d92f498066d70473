//! ABI bindings for the token and airdrop contracts

#![allow(missing_docs)]

use alloy::sol;

// ─── Token ──────────────────────────────────────────────────────────────────
sol! {
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    interface ITheMemeTV {
        // === ERC-20 views ===
        function name() external view returns (string memory);
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);

        // === Distribution state ===
        function owner() external view returns (address);
        function TEAM_SUPPLY() external view returns (uint256);
        function merkleRoot() external view returns (bytes32);
        function lastUpdatedDay() external view returns (uint256);

        // === Owner operations (amounts in whole tokens) ===
        function updateMerkleRoot(bytes32 newMerkleRoot) external;
        function distributeTokens(address distributionWallet, uint256 supply) external;
        function mintLiquidity(address to, uint256 amount) external;
        function mintMarketing(address to, uint256 amount) external;
        function mintAirdrop(address to, uint256 amount) external;
        function mintProofOfNothing(address to, uint256 amount) external;

        // === Holder operations ===
        function claimDistributionAirDrop(bytes32[] calldata proof, uint256 index, uint256 amount) external;
        function approve(address spender, uint256 amount) external returns (bool);
        function increaseAllowance(address spender, uint256 addedValue) external returns (bool);
        function decreaseAllowance(address spender, uint256 subtractedValue) external returns (bool);
    }
}

// ─── Airdrop distributor ────────────────────────────────────────────────────
sol! {
    #[derive(Debug, PartialEq, Eq)]
    #[sol(rpc)]
    interface IAirdrop {
        function owner() external view returns (address);
        function token() external view returns (address);
        function paused() external view returns (bool);
        function checkAllowance(address owner) external view returns (uint256);

        function pause() external;
        function unpause() external;
        function bulkTransfer(address[] calldata recipients, uint256[] calldata amounts) external;
        function recoverTokens(address tokenAddress, address to) external;
    }
}

// ─── OpenZeppelin v5 custom errors ──────────────────────────────────────────
sol! {
    #[derive(Debug, PartialEq, Eq)]
    interface IOpenZeppelinErrors {
        error EnforcedPause();
        error ExpectedPause();
        error OwnableUnauthorizedAccount(address account);
        error OwnableInvalidOwner(address owner);
        error ERC20InsufficientBalance(address sender, uint256 balance, uint256 needed);
        error ERC20InsufficientAllowance(address spender, uint256 allowance, uint256 needed);
        error ERC20InvalidReceiver(address receiver);
        error ERC20ExceededCap(uint256 increasedSupply, uint256 cap);
    }
}
